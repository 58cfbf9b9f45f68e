//! Router-level tests for the HTTP API
#[path = "common/mod.rs"]
mod common;

use axum::body::Body;
use axum::http::Request;
use common::{TEST_BUCKET, test_api, test_api_with};
use serde_json::json;

#[tokio::test]
async fn test_health_ok() {
    let api = test_api();

    let (status, body) = api.get("/v1/health").await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["graph"], "ok");
    assert_eq!(body["checks"]["storage"], "ok");
}

#[tokio::test]
async fn test_health_degraded_without_bucket() {
    let mut config = common::sync_config();
    config.storage.bucket = String::new();
    let api = test_api_with(config);

    let (status, body) = api.get("/v1/health").await;

    assert_eq!(status, 503);
    assert_eq!(body["status"], "degraded");
    assert_eq!(
        body["checks"]["storage"],
        "Missing required configuration: BUCKET_NAME"
    );
}

#[tokio::test]
async fn test_list_missions() {
    let api = test_api();
    let (videos, transcripts) = api.add_mission("m1", "Apollo");
    api.drive.add_file(&videos, "v1", "Intro.mp4", b"video");
    api.drive.add_file(&videos, "v2", "Demo Día.mp4", b"video");
    api.drive.add_file(&transcripts, "t1", "Intro.docx", b"docx");
    api.storage.put(TEST_BUCKET, "json/intro.json", b"{}".to_vec()).await;

    let (status, body) = api.get("/v1/missions").await;

    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 1);
    let mission = &body[0];
    assert_eq!(mission["missionId"], "m1");
    assert_eq!(mission["videoCount"], 2);
    assert_eq!(mission["processedCount"], 1);
    assert_eq!(mission["videos"][0]["videoId"], "v1");
    assert_eq!(mission["videos"][0]["transcriptId"], "t1");
    assert_eq!(mission["videos"][0]["processed"], true);
    assert_eq!(mission["videos"][0]["webUrl"], "https://sharepoint.test/v1");
    assert!(mission["videos"][1]["transcriptId"].is_null());
    assert_eq!(mission["videos"][1]["processed"], false);

    assert_eq!(api.metrics.get_metric_values("MissionsReconciled").await, vec![1.0]);
    assert_eq!(api.metrics.get_metric_values("RequestCount").await, vec![1.0]);
}

#[tokio::test]
async fn test_list_missions_fails_when_root_is_missing() {
    let api = test_api();

    let (status, body) = api.get("/v1/missions").await;

    assert_eq!(status, 500);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("Failed to list mission folders")
    );
    assert_eq!(api.metrics.get_metric_values("ErrorCount").await, vec![1.0]);
}

#[tokio::test]
async fn test_collect_metadata() {
    let api = test_api();
    api.add_mission("m1", "Apollo");
    api.add_mission("m2", "Gemini");

    let (status, body) = api.post("/v1/missions/metadata").await;

    assert_eq!(status, 200);
    assert_eq!(body["message"], "Mission folders collected successfully");
    assert_eq!(body["folderCount"], 2);
    assert_eq!(
        body["locations"]["metadata"],
        format!("s3://{}/json/videos/folders_metadata.json", TEST_BUCKET)
    );
    assert!(body["executionTime"].as_str().unwrap().ends_with(" seconds"));

    let saved = api
        .storage
        .get(TEST_BUCKET, "json/videos/folders_metadata.json")
        .await
        .unwrap();
    let folders: serde_json::Value = serde_json::from_slice(&saved.data).unwrap();
    assert_eq!(folders[0]["id"], "m1");
    assert_eq!(folders[1]["name"], "Gemini");
    assert_eq!(folders[1]["createdDateTime"], "2024-03-01T09:30:00Z");
}

#[tokio::test]
async fn test_transfer_assets() {
    let api = test_api();
    let (videos, transcripts) = api.add_mission("m1", "Apollo");
    api.drive.add_file(&videos, "v1", "Demo Día.mp4", b"video-bytes");
    api.drive.add_file(&transcripts, "t1", "Demo Día.docx", b"docx-bytes");

    let (status, body) = api.post("/v1/videos/v1/transcripts/t1").await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"message": "Successfully processed 'Demo Día.mp4' and 'Demo Día.docx'"})
    );
    assert_eq!(
        api.storage.get(TEST_BUCKET, "video/demo_dia.mp4").await.unwrap().data,
        b"video-bytes"
    );
    assert_eq!(
        api.storage
            .get(TEST_BUCKET, "transcript/demo_dia.docx")
            .await
            .unwrap()
            .data,
        b"docx-bytes"
    );
    assert_eq!(
        api.metrics.get_metric_values("AssetsTransferred").await,
        vec![1.0, 1.0]
    );
}

#[tokio::test]
async fn test_transfer_partial_failure() {
    let api = test_api();
    let (videos, transcripts) = api.add_mission("m1", "Apollo");
    api.drive.add_file(&videos, "v1", "Intro.mp4", b"video-bytes");
    api.drive.add_file(&transcripts, "t1", "Intro.docx", b"docx-bytes");
    api.drive.fail_download("t1");

    let (status, body) = api.post("/v1/videos/v1/transcripts/t1").await;

    assert_eq!(status, 500);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("One or more files failed to process.")
    );
    assert!(api.metrics.get_metric_values("AssetsTransferred").await.is_empty());
}

#[tokio::test]
async fn test_transfer_blank_id() {
    let api = test_api();

    let (status, body) = api.post("/v1/videos/%20/transcripts/t1").await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Missing videoId or transcriptId.");
}

#[tokio::test]
async fn test_unknown_route() {
    let api = test_api();

    let (status, _) = api.get("/v1/unknown").await;

    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_cors_preflight() {
    let api = test_api();
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/v1/missions")
        .header("origin", "https://portal.example.com")
        .header("access-control-request-method", "GET")
        .body(Body::empty())
        .unwrap();

    let response = api.send(request).await;

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

#[tokio::test]
async fn test_lambda_handler_round_trip() {
    let api = test_api();
    let request = lambda_http::Request::new(lambda_http::Body::Empty);
    let (mut parts, body) = request.into_parts();
    parts.uri = "/v1/health".parse().unwrap();
    let request = lambda_http::Request::from_parts(parts, body);

    let response = missionsync_api::handler(api.ctx.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
    assert_eq!(body["status"], "healthy");
}

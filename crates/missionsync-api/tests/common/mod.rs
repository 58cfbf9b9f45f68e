//! Common test utilities for API integration tests
#![allow(dead_code)]

pub mod mocks;

use axum::body::Body;
use axum::http::{Request, Response};
use missionsync_api::ApiContext;
use missionsync_core::catalog::DriveSource;
use missionsync_core::models::{GraphConfig, LlmConfig, SearchConfig, StorageConfig, SyncConfig};
use missionsync_core::services::{InMemoryStorageService, MockMetricsService};
use mocks::MockDrive;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_BUCKET: &str = "missionsync-media-test";
pub const ROOT_FOLDER: &str = "root";

pub struct TestApi {
    pub ctx: Arc<ApiContext>,
    pub storage: Arc<InMemoryStorageService>,
    pub drive: Arc<MockDrive>,
    pub metrics: Arc<MockMetricsService>,
}

pub fn sync_config() -> SyncConfig {
    SyncConfig {
        graph: GraphConfig {
            tenant_id: "tenant".to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            site_id: "site".to_string(),
            drive_id: "drive".to_string(),
            root_folder_id: ROOT_FOLDER.to_string(),
        },
        storage: StorageConfig {
            bucket: TEST_BUCKET.to_string(),
            metadata_prefix: "json/videos/".to_string(),
            ..Default::default()
        },
        llm: LlmConfig::default(),
        search: SearchConfig {
            index: None,
            uri: None,
            username: None,
            password: None,
        },
    }
}

pub fn test_api() -> TestApi {
    test_api_with(sync_config())
}

pub fn test_api_with(config: SyncConfig) -> TestApi {
    let storage = Arc::new(InMemoryStorageService::new());
    let drive = Arc::new(MockDrive::new());
    let metrics = Arc::new(MockMetricsService::new());

    let ctx = Arc::new(ApiContext {
        config,
        storage: storage.clone(),
        drive: DriveSource::Fixed(drive.clone()),
        metrics: metrics.clone(),
    });

    TestApi {
        ctx,
        storage,
        drive,
        metrics,
    }
}

impl TestApi {
    /// Sends one request through the full router, middleware included
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        missionsync_api::router(self.ctx.clone())
            .oneshot(request)
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> (u16, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        into_json(self.send(request).await).await
    }

    pub async fn post(&self, uri: &str) -> (u16, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        into_json(self.send(request).await).await
    }

    /// Adds a mission folder with `video` and `Transcript` subfolders
    pub fn add_mission(&self, id: &str, name: &str) -> (String, String) {
        let video_folder = format!("{}-video", id);
        let transcript_folder = format!("{}-transcript", id);
        self.drive.add_folder(ROOT_FOLDER, id, name);
        self.drive.add_folder(id, &video_folder, "video");
        self.drive.add_folder(id, &transcript_folder, "Transcript");
        (video_folder, transcript_folder)
    }
}

pub async fn into_json(response: Response<Body>) -> (u16, Value) {
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

/// Transfer endpoint - copies a video and its transcript into the bucket
use axum::{
    Json,
    extract::{Path, State},
};
use missionsync_core::services::metrics::Metrics;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{error, info};

use crate::context::ApiContext;
use crate::error::ApiError;

pub async fn transfer(
    State(ctx): State<Arc<ApiContext>>,
    Path((video_id, transcript_id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    if video_id.trim().is_empty() || transcript_id.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Missing videoId or transcriptId.".to_string(),
        ));
    }

    info!(
        video_id = %video_id,
        transcript_id = %transcript_id,
        "Transferring video and transcript"
    );

    let report = ctx
        .catalog()?
        .transfer_assets(&video_id, &transcript_id)
        .await
        .map_err(|e| {
            error!(error = %e, "Transfer failed");
            ApiError::Internal(e.to_string())
        })?;

    Metrics::asset_transferred(ctx.metrics.as_ref(), "video", report.video.size).await;
    Metrics::asset_transferred(ctx.metrics.as_ref(), "transcript", report.transcript.size).await;

    Ok(Json(json!({ "message": report.message() })))
}

/// Mission endpoints - reconciled view and folder metadata collection
use axum::{Json, extract::State};
use missionsync_core::models::MissionSummary;
use missionsync_core::services::metrics::Metrics;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::context::ApiContext;
use crate::error::ApiError;

/// Every mission with its videos, transcripts and processed flags
pub async fn list(State(ctx): State<Arc<ApiContext>>) -> Result<Json<Vec<MissionSummary>>, ApiError> {
    let start = Instant::now();

    let missions = ctx.catalog()?.reconciled_missions().await.map_err(|e| {
        error!(error = %e, "Failed to reconcile missions");
        ApiError::from(e)
    })?;

    let videos: usize = missions.iter().map(|m| m.video_count).sum();
    let processed: usize = missions.iter().map(|m| m.processed_count).sum();
    Metrics::missions_reconciled(
        ctx.metrics.as_ref(),
        missions.len(),
        videos,
        processed,
        start.elapsed().as_millis() as f64,
    )
    .await;

    info!(
        missions = missions.len(),
        videos = videos,
        duration_ms = start.elapsed().as_millis() as u64,
        "Returning reconciled missions"
    );
    Ok(Json(missions))
}

/// Saves name and creation info of every mission folder to the bucket
pub async fn collect_metadata(State(ctx): State<Arc<ApiContext>>) -> Result<Json<Value>, ApiError> {
    let start = Instant::now();

    let report = ctx.catalog()?.collect_folder_metadata().await.map_err(|e| {
        error!(
            error = %e,
            duration_ms = start.elapsed().as_millis() as u64,
            "Failed to collect folder metadata"
        );
        ApiError::from(e)
    })?;

    Ok(Json(json!({
        "message": "Mission folders collected successfully",
        "locations": { "metadata": report.location },
        "executionTime": format!("{:.4} seconds", start.elapsed().as_secs_f64()),
        "folderCount": report.folder_count,
    })))
}

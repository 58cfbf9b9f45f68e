/// Direct invocations - catalog operations triggered by schedule or console
use crate::context::WorkerContext;
use missionsync_core::SyncError;
use missionsync_core::models::{DirectInvocation, LambdaResponse};
use missionsync_core::services::metrics::Metrics;
use serde_json::json;
use std::time::Instant;
use tracing::{error, info};

pub async fn handle(ctx: &WorkerContext, invocation: DirectInvocation) -> LambdaResponse {
    match invocation {
        DirectInvocation::Reconcile => reconcile(ctx).await,
        DirectInvocation::CollectFolderMetadata => collect_folder_metadata(ctx).await,
    }
}

async fn reconcile(ctx: &WorkerContext) -> LambdaResponse {
    let start_time = Instant::now();

    let result = match ctx.catalog() {
        Ok(catalog) => catalog.reconciled_missions().await,
        Err(e) => Err(e),
    };
    match result {
        Ok(missions) => {
            let videos: usize = missions.iter().map(|m| m.video_count).sum();
            let processed: usize = missions.iter().map(|m| m.processed_count).sum();
            Metrics::missions_reconciled(
                ctx.metrics.as_ref(),
                missions.len(),
                videos,
                processed,
                start_time.elapsed().as_millis() as f64,
            )
            .await;

            info!(
                missions = missions.len(),
                videos = videos,
                processed = processed,
                "Reconciliation finished"
            );
            LambdaResponse::ok(&json!(missions))
        }
        Err(e) => failure(ctx, "reconcile", &e).await,
    }
}

async fn collect_folder_metadata(ctx: &WorkerContext) -> LambdaResponse {
    let start_time = Instant::now();

    let result = match ctx.catalog() {
        Ok(catalog) => catalog.collect_folder_metadata().await,
        Err(e) => Err(e),
    };
    let execution_time = format!("{:.4} seconds", start_time.elapsed().as_secs_f64());

    match result {
        Ok(report) => LambdaResponse::ok(&json!({
            "message": "Mission folders collected successfully",
            "locations": { "metadata": report.location },
            "executionTime": execution_time,
            "folderCount": report.folder_count,
        })),
        Err(e) => {
            error!(error = %e, execution_time = %execution_time, "Folder metadata collection failed");
            failure(ctx, "collect_folder_metadata", &e).await
        }
    }
}

async fn failure(ctx: &WorkerContext, handler: &str, e: &SyncError) -> LambdaResponse {
    error!(handler = handler, error = %e, "Direct invocation failed");
    Metrics::error_occurred(ctx.metrics.as_ref(), "catalog", handler).await;
    LambdaResponse::error(500, &e.to_string())
}

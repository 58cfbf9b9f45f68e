/// Search indexing - structured JSON documents into OpenSearch
use crate::context::WorkerContext;
use missionsync_core::SyncError;
use missionsync_core::models::LambdaResponse;
use missionsync_core::services::metrics::Metrics;
use missionsync_core::services::search::document_id;
use missionsync_core::utils::logging::sanitize_s3_key_for_log;
use missionsync_core::utils::retry::retry_with_backoff;
use serde_json::{Value, json};
use tracing::{error, info};

/// Indexes one document; the outcome is always an envelope.
///
/// Bad input (missing settings, invalid JSON, rejected document) maps to
/// 400, everything else to 500.
#[tracing::instrument(
    name = "worker.index_document",
    skip(ctx, key),
    fields(key = %sanitize_s3_key_for_log(key))
)]
pub async fn handle(ctx: &WorkerContext, bucket: &str, key: &str) -> LambdaResponse {
    match index(ctx, bucket, key).await {
        Ok(response) => {
            Metrics::document_indexed(ctx.metrics.as_ref()).await;
            LambdaResponse::ok(&json!({
                "message": "Document indexed successfully",
                "document_id": document_id(key),
                "response": response,
            }))
        }
        Err(e) => {
            let message = format!("Internal server error: {}", e);
            error!(error = %e, "Failed to index document");
            Metrics::error_occurred(ctx.metrics.as_ref(), "indexing", "index").await;

            let status = if e.is_client_error() { 400 } else { 500 };
            LambdaResponse::error(status, &message)
        }
    }
}

async fn index(ctx: &WorkerContext, bucket: &str, key: &str) -> Result<Value, SyncError> {
    let indexer = ctx.indexer()?;

    let content = ctx.storage.download(bucket, key).await?;
    info!("Downloaded {} bytes", content.len());
    let document: Value = serde_json::from_slice(&content)?;

    let doc_id = document_id(key);
    retry_with_backoff(
        || indexer.index_document(&doc_id, &document),
        ctx.retry.clone(),
        "opensearch.index_document",
    )
    .await
}

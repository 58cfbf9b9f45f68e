/// Transcript structuring - `.docx` transcript in, structured JSON out
use crate::context::WorkerContext;
use missionsync_core::SyncError;
use missionsync_core::constants::{JSON_CONTENT_TYPE, PROCESSED_SUFFIX, TRANSCRIPT_SUFFIX};
use missionsync_core::models::{LambdaResponse, StorageConfig};
use missionsync_core::normalize::{basename, split_extension};
use missionsync_core::services::metrics::Metrics;
use missionsync_core::utils::docx::extract_docx_text;
use missionsync_core::utils::logging::sanitize_s3_key_for_log;
use serde_json::{Value, json};
use std::time::Instant;
use tracing::{error, info};

/// Where the structured document for a transcript is written: the
/// transcripts prefix becomes the JSON prefix and `.docx` becomes `.json`.
pub fn output_key(key: &str, layout: &StorageConfig) -> String {
    let key = match key.strip_prefix(&layout.transcripts_prefix) {
        Some(rest) if !layout.transcripts_prefix.is_empty() => {
            format!("{}{}", layout.json_prefix, rest)
        }
        _ => key.to_string(),
    };

    let stem_len = key.len().saturating_sub(TRANSCRIPT_SUFFIX.len());
    match key.get(stem_len..) {
        Some(ext) if ext.eq_ignore_ascii_case(TRANSCRIPT_SUFFIX) => {
            format!("{}{}", &key[..stem_len], PROCESSED_SUFFIX)
        }
        _ => key,
    }
}

/// Title handed to the model: the transcript's file name without extension
pub fn video_title(key: &str) -> &str {
    split_extension(basename(key)).0
}

/// Structures one transcript.
///
/// On failure an error document is written to the output key so the failure
/// is visible next to the outputs, then the error is returned.
#[tracing::instrument(
    name = "worker.structure_transcript",
    skip(ctx, key),
    fields(key = %sanitize_s3_key_for_log(key))
)]
pub async fn handle(ctx: &WorkerContext, bucket: &str, key: &str) -> Result<LambdaResponse, SyncError> {
    let start_time = Instant::now();
    let output_key = output_key(key, &ctx.config.storage);

    info!("Processing s3://{}/{}", bucket, sanitize_s3_key_for_log(key));

    match structure(ctx, bucket, key, &output_key).await {
        Ok(()) => {
            Metrics::transcript_structured(
                ctx.metrics.as_ref(),
                start_time.elapsed().as_millis() as f64,
            )
            .await;

            let message = format!("Successfully processed {} and created {}", key, output_key);
            info!(output_key = %sanitize_s3_key_for_log(&output_key), "Transcript structured");
            Ok(LambdaResponse::ok(&json!({ "message": message })))
        }
        Err(e) => {
            error!(error = %e, "Error processing transcript");
            Metrics::error_occurred(ctx.metrics.as_ref(), error_type(&e), "transcript").await;

            let envelope = json!({
                "error": "Processing failed",
                "message": e.to_string(),
                "key": key,
                "bucket": bucket,
            });
            if let Err(save_err) = save_json(ctx, bucket, &output_key, &envelope).await {
                error!(error = %save_err, "Failed to save error document");
            }

            Err(e)
        }
    }
}

async fn structure(
    ctx: &WorkerContext,
    bucket: &str,
    key: &str,
    output_key: &str,
) -> Result<(), SyncError> {
    let content = ctx.storage.download(bucket, key).await?;
    let text = extract_docx_text(&content)?;

    let document = ctx.structurer.structure(&text, video_title(key)).await?;

    save_json(ctx, bucket, output_key, &document).await
}

async fn save_json(
    ctx: &WorkerContext,
    bucket: &str,
    key: &str,
    document: &Value,
) -> Result<(), SyncError> {
    ctx.storage
        .upload(
            bucket,
            key,
            serde_json::to_vec_pretty(document)?,
            Some(JSON_CONTENT_TYPE),
        )
        .await
}

fn error_type(e: &SyncError) -> &'static str {
    if e.is_retriable() { "retriable" } else { "permanent" }
}

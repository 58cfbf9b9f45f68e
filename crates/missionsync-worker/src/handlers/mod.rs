/// Lambda event handlers
pub mod direct;
pub mod index;
pub mod transcript;

use crate::context::WorkerContext;
use lambda_runtime::{Error, LambdaEvent};
use missionsync_core::SyncError;
use missionsync_core::constants::{PROCESSED_SUFFIX, TRANSCRIPT_SUFFIX};
use missionsync_core::models::{LambdaResponse, S3Event, WorkerEvent};
use missionsync_core::utils::logging::sanitize_s3_key_for_log;
use serde_json::{Value, json};
use tracing::{error, info, warn};

/// Main Lambda handler - routes events to appropriate handler
pub async fn handler(ctx: &WorkerContext, event: LambdaEvent<Value>) -> Result<Value, Error> {
    info!("Received Lambda event");

    let worker_event: WorkerEvent = serde_json::from_value(event.payload).map_err(|e| {
        error!("Failed to parse Lambda event: {}", e);
        SyncError::Lambda(format!("Invalid event type: {}", e))
    })?;

    let response = match worker_event {
        WorkerEvent::S3(s3_event) => {
            info!("Processing S3 event");
            handle_records(ctx, s3_event).await?
        }
        WorkerEvent::Direct(invocation) => {
            info!(action = ?invocation, "Processing direct invocation");
            direct::handle(ctx, invocation).await
        }
    };

    Ok(serde_json::to_value(response)?)
}

/// What the worker does with an object, decided by its key suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Transcript,
    Document,
    Ignored,
}

impl RecordKind {
    pub fn for_key(key: &str) -> Self {
        let key = key.to_lowercase();
        if key.ends_with(TRANSCRIPT_SUFFIX) {
            Self::Transcript
        } else if key.ends_with(PROCESSED_SUFFIX) {
            Self::Document
        } else {
            Self::Ignored
        }
    }
}

/// Processes every record.
///
/// Indexing outcomes are reported in the response. A failed structuring run
/// fails the invocation once every record has been attempted, so the storage
/// notification is retried.
async fn handle_records(ctx: &WorkerContext, event: S3Event) -> Result<LambdaResponse, SyncError> {
    info!("Processing {} S3 record(s)", event.records.len());

    let mut results = Vec::with_capacity(event.records.len());
    let mut structuring_failures = Vec::new();

    for record in &event.records {
        let bucket = &record.s3.bucket.name;
        let key = record.s3.object.decoded_key();

        let response = match RecordKind::for_key(&key) {
            RecordKind::Transcript => match transcript::handle(ctx, bucket, &key).await {
                Ok(response) => response,
                Err(e) => {
                    let response = LambdaResponse::error(500, &e.to_string());
                    structuring_failures.push(e);
                    response
                }
            },
            RecordKind::Document => index::handle(ctx, bucket, &key).await,
            RecordKind::Ignored => {
                warn!(key = %sanitize_s3_key_for_log(&key), "Ignoring object with unsupported suffix");
                LambdaResponse::ok(&json!({ "message": "Ignored", "key": key }))
            }
        };
        results.push((key, response));
    }

    if let Some(e) = structuring_failures.into_iter().next() {
        return Err(e);
    }

    Ok(combine(results))
}

/// A single record keeps its own envelope; several are wrapped in a summary
/// carrying the highest status code.
fn combine(mut results: Vec<(String, LambdaResponse)>) -> LambdaResponse {
    if results.len() == 1 {
        return results.remove(0).1;
    }

    let status = results
        .iter()
        .map(|(_, response)| response.status_code)
        .max()
        .unwrap_or(200);

    let records: Vec<Value> = results
        .into_iter()
        .map(|(key, response)| {
            json!({
                "key": key,
                "statusCode": response.status_code,
                "body": serde_json::from_str::<Value>(&response.body).unwrap_or(Value::String(response.body)),
            })
        })
        .collect();

    LambdaResponse::new(status, &json!({ "results": records }))
}

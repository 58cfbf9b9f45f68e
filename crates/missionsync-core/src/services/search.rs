/// OpenSearch document indexing
use crate::constants::{SEARCH_CONNECT_TIMEOUT_SECONDS, SEARCH_REQUEST_TIMEOUT_SECONDS};
use crate::error::SyncError;
use crate::models::SearchTarget;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info};

#[async_trait]
pub trait SearchIndexer: Send + Sync {
    /// Creates or replaces a document; returns the engine's response body
    async fn index_document(&self, doc_id: &str, document: &Value) -> Result<Value, SyncError>;
}

/// Document id derived from an object key: `/` becomes `_` and `.json` is dropped
pub fn document_id(key: &str) -> String {
    key.replace('/', "_").replace(".json", "")
}

pub struct OpenSearchIndexer {
    http: reqwest::Client,
    target: SearchTarget,
}

impl OpenSearchIndexer {
    pub fn new(target: SearchTarget) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(SEARCH_CONNECT_TIMEOUT_SECONDS))
            .timeout(Duration::from_secs(SEARCH_REQUEST_TIMEOUT_SECONDS))
            .build()
            .map_err(|e| SyncError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, target })
    }

    fn document_url(&self, doc_id: &str) -> String {
        format!("{}/{}/_doc/{}", self.target.uri, self.target.index, doc_id)
    }
}

/// Maps a non-success status to an error; server errors and throttling are retriable
fn status_error(status: StatusCode, body: &str) -> SyncError {
    let message = format!("OpenSearch returned {}: {}", status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SyncError::Auth(message),
        StatusCode::TOO_MANY_REQUESTS => SyncError::Search(message),
        s if s.is_client_error() => SyncError::Validation(message),
        _ => SyncError::Search(message),
    }
}

#[async_trait]
impl SearchIndexer for OpenSearchIndexer {
    async fn index_document(&self, doc_id: &str, document: &Value) -> Result<Value, SyncError> {
        let url = self.document_url(doc_id);
        info!(doc_id = doc_id, url = %url, "Indexing document");

        let response = self
            .http
            .put(&url)
            .basic_auth(&self.target.username, Some(&self.target.password))
            .json(document)
            .send()
            .await
            .map_err(|e| {
                error!(doc_id = doc_id, error = %e, "Failed to reach OpenSearch");
                SyncError::Search(format!("Request to OpenSearch failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(doc_id = doc_id, status = status.as_u16(), "Failed to index document");
            return Err(status_error(status, &body));
        }

        info!(doc_id = doc_id, status = status.as_u16(), "OpenSearch accepted document");
        response
            .json()
            .await
            .map_err(|e| SyncError::Search(format!("Invalid OpenSearch response: {}", e)))
    }
}

/// SharePoint document library access through Microsoft Graph
use crate::constants::{DOWNLOAD_TIMEOUT_SECONDS, GRAPH_BASE_URL, GRAPH_REQUEST_TIMEOUT_SECONDS};
use crate::error::SyncError;
use crate::models::{DriveItem, DriveItemPage, GraphConfig};
use crate::services::auth::TokenProvider;
use crate::services::cache::RequestCache;
use crate::utils::logging::redact_url;
use async_trait::async_trait;
use regex::Regex;
use reqwest::header;
use serde_json::Value;
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

static TEMPLATE_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^}]*\}").unwrap());

#[async_trait]
pub trait DriveService: Send + Sync {
    /// Lists every child of a folder, following pagination
    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveItem>, SyncError>;

    /// Reads item metadata, including its pre-authenticated download URL
    async fn get_item(&self, item_id: &str) -> Result<DriveItem, SyncError>;

    /// Downloads file content from a pre-authenticated URL
    async fn download(&self, url: &str) -> Result<Vec<u8>, SyncError>;
}

/// Graph-backed drive service for one SharePoint document library
pub struct GraphDriveService {
    http: reqwest::Client,
    base_url: String,
    site_id: String,
    drive_id: String,
    tokens: Arc<dyn TokenProvider>,
    cache: Mutex<RequestCache>,
}

impl GraphDriveService {
    pub fn new(
        http: reqwest::Client,
        config: &GraphConfig,
        tokens: Arc<dyn TokenProvider>,
        cache: RequestCache,
    ) -> Self {
        Self::with_base_url(http, config, tokens, cache, GRAPH_BASE_URL)
    }

    pub fn with_base_url(
        http: reqwest::Client,
        config: &GraphConfig,
        tokens: Arc<dyn TokenProvider>,
        cache: RequestCache,
        base_url: &str,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            site_id: config.site_id.clone(),
            drive_id: config.drive_id.clone(),
            tokens,
            cache: Mutex::new(cache),
        }
    }

    fn item_url(&self, item_id: &str) -> String {
        format!(
            "{}/sites/{}/drives/{}/items/{}",
            self.base_url, self.site_id, self.drive_id, item_id
        )
    }

    /// Authenticated GET through the request cache
    async fn get_json(&self, url: &str) -> Result<Value, SyncError> {
        let url = clean_url(url)?;

        if let Some(cached) = self.cache.lock().await.get(&url) {
            debug!(url = %url, "Using cached Graph response");
            return Ok(cached);
        }

        let token = self.tokens.access_token().await?;
        debug!(url = %url, "Requesting Graph API");

        let value: Value = self
            .http
            .get(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .timeout(Duration::from_secs(GRAPH_REQUEST_TIMEOUT_SECONDS))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                error!(url = %url, error = %e, "Graph API request failed");
                SyncError::Graph(format!("Request to {} failed: {}", url, e))
            })?
            .json()
            .await
            .map_err(|e| SyncError::Graph(format!("Invalid JSON from {}: {}", url, e)))?;

        self.cache.lock().await.insert(&url, value.clone());
        Ok(value)
    }
}

/// Rejects empty URLs and strips `{...}` template fragments left in a URL
fn clean_url(url: &str) -> Result<String, SyncError> {
    if url.trim().is_empty() {
        return Err(SyncError::Graph("Empty Graph API URL".to_string()));
    }

    if url.contains(['{', '}']) {
        let cleaned = TEMPLATE_FRAGMENT.replace_all(url, "").to_string();
        warn!(url = %url, cleaned = %cleaned, "Graph URL contained template fragments");
        return Ok(cleaned);
    }

    Ok(url.to_string())
}

#[async_trait]
impl DriveService for GraphDriveService {
    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveItem>, SyncError> {
        let mut items = Vec::new();
        let mut next = Some(format!("{}/children", self.item_url(folder_id)));

        while let Some(url) = next {
            let page: DriveItemPage = serde_json::from_value(self.get_json(&url).await?)
                .map_err(|e| SyncError::Graph(format!("Unexpected children payload: {}", e)))?;
            items.extend(page.value);
            next = page.next_link;
        }

        debug!(folder_id = folder_id, count = items.len(), "Listed folder children");
        Ok(items)
    }

    async fn get_item(&self, item_id: &str) -> Result<DriveItem, SyncError> {
        let value = self.get_json(&self.item_url(item_id)).await?;
        serde_json::from_value(value)
            .map_err(|e| SyncError::Graph(format!("Unexpected item payload: {}", e)))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, SyncError> {
        let bytes = self
            .http
            .get(url)
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECONDS))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                SyncError::Graph(format!("Download from {} failed: {}", redact_url(url), e.without_url()))
            })?
            .bytes()
            .await
            .map_err(|e| SyncError::Graph(format!("Failed to read download body: {}", e.without_url())))?;

        info!(url = %redact_url(url), size = bytes.len(), "Downloaded file content");
        Ok(bytes.to_vec())
    }
}

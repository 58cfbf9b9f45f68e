/// Configuration service - loads config from environment variables
use crate::constants::{
    DEFAULT_INDEX, DEFAULT_JSON_PREFIX, DEFAULT_MODEL_ID, DEFAULT_TRANSCRIPTS_PREFIX,
    DEFAULT_VIDEOS_PREFIX,
};
use crate::error::SyncError;
use crate::models::{GraphConfig, LlmConfig, SearchConfig, StorageConfig, SyncConfig};
use async_trait::async_trait;

#[async_trait]
pub trait ConfigProvider: Send + Sync {
    async fn get_config(&self) -> Result<SyncConfig, SyncError>;
}

/// Environment variable-based configuration provider.
///
/// Loading never fails on missing values; each entry point validates the
/// sections it needs so a worker without Graph credentials still starts.
pub struct EnvConfigProvider {
    config: SyncConfig,
}

impl EnvConfigProvider {
    pub fn new() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| lookup(name).unwrap_or_default();
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let with_default =
            |name: &str, default: &str| optional(name).unwrap_or_else(|| default.to_string());

        let config = SyncConfig {
            graph: GraphConfig {
                tenant_id: required("TENANT_ID"),
                client_id: required("CLIENT_ID"),
                client_secret: required("CLIENT_SECRET"),
                site_id: required("SITE_ID"),
                drive_id: required("DRIVE_ID"),
                root_folder_id: required("FOLDER_ID"),
            },
            storage: StorageConfig {
                bucket: required("BUCKET_NAME"),
                videos_prefix: with_default("PREFIX_VIDEOS_FOLDER", DEFAULT_VIDEOS_PREFIX),
                transcripts_prefix: with_default(
                    "PREFIX_TRANSCRIPTS_FOLDER",
                    DEFAULT_TRANSCRIPTS_PREFIX,
                ),
                json_prefix: with_default("PREFIX_JSON_FOLDER", DEFAULT_JSON_PREFIX),
                metadata_prefix: with_default("PREFIX_JSON_FOLDERVIDEOS", ""),
            },
            llm: LlmConfig {
                model_id: with_default("MODEL_ID", DEFAULT_MODEL_ID),
                index: with_default("INDEX", DEFAULT_INDEX),
            },
            search: SearchConfig {
                index: optional("INDEX"),
                uri: optional("OPENSEARCH_URI"),
                username: optional("OPENSEARCH_USERNAME"),
                password: optional("OPENSEARCH_PASSWORD"),
            },
        };

        tracing::debug!(config = ?config, "Loaded configuration from environment");
        Self { config }
    }
}

impl Default for EnvConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigProvider for EnvConfigProvider {
    async fn get_config(&self) -> Result<SyncConfig, SyncError> {
        Ok(self.config.clone())
    }
}

/// Fixed configuration, for tests
pub struct StaticConfigProvider {
    config: SyncConfig,
}

impl StaticConfigProvider {
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ConfigProvider for StaticConfigProvider {
    async fn get_config(&self) -> Result<SyncConfig, SyncError> {
        Ok(self.config.clone())
    }
}

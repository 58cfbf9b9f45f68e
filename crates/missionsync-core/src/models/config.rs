/// Configuration models
use crate::constants::{
    DEFAULT_INDEX, DEFAULT_JSON_PREFIX, DEFAULT_MODEL_ID, DEFAULT_TRANSCRIPTS_PREFIX,
    DEFAULT_VIDEOS_PREFIX, FOLDERS_METADATA_FILE,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// SharePoint / Microsoft Graph access
#[derive(Clone, Deserialize, Serialize)]
pub struct GraphConfig {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub site_id: String,
    pub drive_id: String,
    /// Folder whose children are the mission folders
    pub root_folder_id: String,
}

// Keeps the secret out of logs
impl fmt::Debug for GraphConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphConfig")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("site_id", &self.site_id)
            .field("drive_id", &self.drive_id)
            .field("root_folder_id", &self.root_folder_id)
            .finish()
    }
}

impl GraphConfig {
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("TENANT_ID", &self.tenant_id),
            ("CLIENT_ID", &self.client_id),
            ("CLIENT_SECRET", &self.client_secret),
            ("SITE_ID", &self.site_id),
            ("DRIVE_ID", &self.drive_id),
            ("FOLDER_ID", &self.root_folder_id),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("Missing required configuration: {}", missing.join(", ")))
        }
    }
}

/// S3 layout
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub bucket: String,
    pub videos_prefix: String,
    pub transcripts_prefix: String,
    pub json_prefix: String,
    pub metadata_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            videos_prefix: DEFAULT_VIDEOS_PREFIX.to_string(),
            transcripts_prefix: DEFAULT_TRANSCRIPTS_PREFIX.to_string(),
            json_prefix: DEFAULT_JSON_PREFIX.to_string(),
            metadata_prefix: String::new(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.bucket.trim().is_empty() {
            return Err("Missing required configuration: BUCKET_NAME".to_string());
        }
        Ok(())
    }

    /// Key of the mission folder metadata document
    pub fn metadata_key(&self) -> String {
        format!("{}{}", self.metadata_prefix, FOLDERS_METADATA_FILE)
    }
}

/// Joins a prefix and a file name with exactly one `/`
pub fn join_key(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

/// Bedrock transcript structuring
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    pub model_id: String,
    pub index: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            index: DEFAULT_INDEX.to_string(),
        }
    }
}

/// OpenSearch indexing; every field is required
#[derive(Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub index: Option<String>,
    pub uri: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("index", &self.index)
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Validated OpenSearch settings
#[derive(Clone)]
pub struct SearchTarget {
    pub index: String,
    pub uri: String,
    pub username: String,
    pub password: String,
}

impl SearchConfig {
    /// Reports every missing setting at once
    pub fn validate(&self) -> Result<SearchTarget, String> {
        let fields = [
            ("index", &self.index),
            ("opensearch_uri", &self.uri),
            ("opensearch_username", &self.username),
            ("opensearch_password", &self.password),
        ];
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(format!("Missing required configuration: {}", missing.join(", ")));
        }

        Ok(SearchTarget {
            index: self.index.clone().unwrap_or_default(),
            uri: self
                .uri
                .clone()
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_string(),
            username: self.username.clone().unwrap_or_default(),
            password: self.password.clone().unwrap_or_default(),
        })
    }
}

/// System configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    pub graph: GraphConfig,
    pub storage: StorageConfig,
    pub llm: LlmConfig,
    pub search: SearchConfig,
}

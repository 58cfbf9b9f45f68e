/// Application constants
///
/// This module contains all hardcoded values used throughout the application.
/// Constants are organized by category for easy maintenance.
// ============================================================================
// Microsoft Graph
// ============================================================================
/// Base URL of the Microsoft Graph v1.0 API
pub const GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Base URL of the Microsoft identity platform
pub const LOGIN_BASE_URL: &str = "https://login.microsoftonline.com";

/// OAuth scope requested by the client-credentials flow
pub const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Name of the per-mission subfolder holding videos
pub const VIDEO_SUBFOLDER: &str = "video";

/// Name of the per-mission subfolder holding transcripts
pub const TRANSCRIPT_SUBFOLDER: &str = "transcript";

/// Maximum number of missions whose listings are fetched concurrently
pub const MISSION_FETCH_CONCURRENCY: usize = 4;

// ============================================================================
// Timing Constants
// ============================================================================

/// Timeout for token and Graph metadata requests
pub const GRAPH_REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// Timeout for file content downloads
pub const DOWNLOAD_TIMEOUT_SECONDS: u64 = 30;

/// Connect timeout for search engine requests
pub const SEARCH_CONNECT_TIMEOUT_SECONDS: u64 = 10;

/// Total timeout for search engine requests
pub const SEARCH_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Lifetime of an entry in the request-scoped Graph cache
pub const REQUEST_CACHE_TTL_SECONDS: u64 = 300;

/// Maximum entries held by the request-scoped Graph cache
pub const REQUEST_CACHE_MAX_ENTRIES: usize = 512;

// ============================================================================
// Storage Layout
// ============================================================================

/// Default S3 prefix for uploaded videos
pub const DEFAULT_VIDEOS_PREFIX: &str = "video/";

/// Default S3 prefix for uploaded transcripts
pub const DEFAULT_TRANSCRIPTS_PREFIX: &str = "transcript/";

/// Default S3 prefix for structured JSON outputs
pub const DEFAULT_JSON_PREFIX: &str = "json/";

/// Object name of the mission folder metadata document
pub const FOLDERS_METADATA_FILE: &str = "folders_metadata.json";

/// Suffix of processed outputs
pub const PROCESSED_SUFFIX: &str = ".json";

/// Suffix of transcript documents accepted by the structuring pipeline
pub const TRANSCRIPT_SUFFIX: &str = ".docx";

pub const JSON_CONTENT_TYPE: &str = "application/json";

// ============================================================================
// LLM
// ============================================================================

/// Default Bedrock model used to structure transcripts
pub const DEFAULT_MODEL_ID: &str = "amazon.nova-pro-v1:0";

pub const LLM_MAX_NEW_TOKENS: u32 = 4000;
pub const LLM_TEMPERATURE: f64 = 0.1;
pub const LLM_TOP_P: f64 = 0.9;

// ============================================================================
// Search
// ============================================================================

/// Default search index
pub const DEFAULT_INDEX: &str = "sprintdemos";

// ============================================================================
// Retry Configuration
// ============================================================================

/// Retries after the first attempt for transient failures (3 attempts in total)
pub const MAX_RETRIES: u32 = 2;

/// Base delay for exponential backoff in milliseconds
pub const RETRY_BASE_DELAY_MS: u64 = 200;

/// Maximum delay for exponential backoff in milliseconds
pub const RETRY_MAX_DELAY_MS: u64 = 5 * 1000;

/// Jitter factor for retry delays (0.0 to 1.0)
pub const RETRY_JITTER_FACTOR: f64 = 0.1;

// ============================================================================
// Logging & Monitoring
// ============================================================================

/// Metric namespace for CloudWatch
pub const METRICS_NAMESPACE: &str = "Missionsync";

/// Log target for metrics
pub const LOG_TARGET_METRICS: &str = "metrics";

/// Log target for normalization anomalies
pub const LOG_TARGET_ANOMALY: &str = "normalization_anomaly";

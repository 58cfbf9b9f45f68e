pub mod auth;
pub mod cache;
pub mod config;
pub mod graph;
pub mod llm;
pub mod metrics;
pub mod s3;
pub mod search;

pub use auth::{ClientCredentialsTokenProvider, StaticTokenProvider, TokenProvider};
pub use cache::RequestCache;
pub use config::{ConfigProvider, EnvConfigProvider, StaticConfigProvider};
pub use graph::{DriveService, GraphDriveService};
pub use llm::{BedrockStructurer, TranscriptStructurer};
pub use metrics::{CloudWatchMetricsService, Metrics, MetricsService, MockMetricsService};
pub use s3::{InMemoryStorageService, S3StorageService, StorageService};
pub use search::{OpenSearchIndexer, SearchIndexer, document_id};

/// API Context - shared state for all API handlers
use lambda_http::Error;
use missionsync_core::SyncError;
use missionsync_core::catalog::{DriveSource, MissionCatalog};
use missionsync_core::models::SyncConfig;
use missionsync_core::services::{
    CloudWatchMetricsService, ConfigProvider, EnvConfigProvider, MetricsService,
    S3StorageService, StorageService,
};
use std::sync::Arc;
use tracing::info;

/// API Context contains shared resources for API handlers
#[derive(Clone)]
pub struct ApiContext {
    pub config: SyncConfig,

    /// Bucket holding transferred assets and structured outputs
    pub storage: Arc<dyn StorageService>,

    /// SharePoint access; each request gets its own Graph session
    pub drive: DriveSource,

    pub metrics: Arc<dyn MetricsService>,
}

impl ApiContext {
    /// Create a new API context
    pub async fn new() -> Result<Arc<Self>, Error> {
        // Load AWS config
        let aws_config = aws_config::load_from_env().await;

        let s3_client = aws_sdk_s3::Client::new(&aws_config);
        let cloudwatch_client = aws_sdk_cloudwatch::Client::new(&aws_config);

        let config = EnvConfigProvider::new().get_config().await?;
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SyncError::Config(format!("Failed to build HTTP client: {}", e)))?;

        info!(bucket = %config.storage.bucket, "API context initialized");

        Ok(Arc::new(Self {
            storage: Arc::new(S3StorageService::new(s3_client)),
            drive: DriveSource::Graph {
                http,
                config: config.graph.clone(),
            },
            metrics: Arc::new(CloudWatchMetricsService::new(cloudwatch_client)),
            config,
        }))
    }

    /// A catalog with a fresh token and request cache
    pub fn catalog(&self) -> Result<MissionCatalog, SyncError> {
        self.config.storage.validate().map_err(SyncError::Config)?;

        Ok(MissionCatalog::new(
            self.drive.connect()?,
            self.storage.clone(),
            self.config.storage.clone(),
            self.config.graph.root_folder_id.clone(),
        ))
    }
}

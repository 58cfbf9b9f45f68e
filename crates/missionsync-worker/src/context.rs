/// Worker context - long-lived clients shared by every invocation
use missionsync_core::SyncError;
use missionsync_core::catalog::{DriveSource, MissionCatalog};
use missionsync_core::models::SyncConfig;
use missionsync_core::services::{
    BedrockStructurer, CloudWatchMetricsService, ConfigProvider, EnvConfigProvider,
    MetricsService, OpenSearchIndexer, S3StorageService, SearchIndexer, StorageService,
    TranscriptStructurer,
};
use missionsync_core::utils::retry::RetryConfig;
use std::sync::Arc;
use tracing::{info, warn};

pub struct WorkerContext {
    pub config: SyncConfig,
    pub storage: Arc<dyn StorageService>,
    pub structurer: Arc<dyn TranscriptStructurer>,
    /// `None` when the search settings are incomplete; indexing then fails
    /// with the list of missing settings
    pub indexer: Option<Arc<dyn SearchIndexer>>,
    pub drive: DriveSource,
    pub metrics: Arc<dyn MetricsService>,
    pub retry: RetryConfig,
}

impl WorkerContext {
    /// Builds AWS clients and loads configuration once per cold start
    pub async fn from_env() -> Result<Self, SyncError> {
        let aws_config = aws_config::load_from_env().await;

        let s3_client = aws_sdk_s3::Client::new(&aws_config);
        let bedrock_client = aws_sdk_bedrockruntime::Client::new(&aws_config);
        let cloudwatch_client = aws_sdk_cloudwatch::Client::new(&aws_config);

        let config = EnvConfigProvider::new().get_config().await?;

        let indexer: Option<Arc<dyn SearchIndexer>> = match config.search.validate() {
            Ok(target) => Some(Arc::new(OpenSearchIndexer::new(target)?)),
            Err(e) => {
                warn!(error = %e, "Search indexing disabled");
                None
            }
        };

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SyncError::Config(format!("Failed to build HTTP client: {}", e)))?;

        info!(
            bucket = %config.storage.bucket,
            model_id = %config.llm.model_id,
            "Worker context initialized"
        );

        Ok(Self {
            structurer: Arc::new(BedrockStructurer::new(
                bedrock_client,
                &config.llm.model_id,
                &config.llm.index,
            )),
            storage: Arc::new(S3StorageService::new(s3_client)),
            indexer,
            drive: DriveSource::Graph {
                http,
                config: config.graph.clone(),
            },
            metrics: Arc::new(CloudWatchMetricsService::new(cloudwatch_client)),
            retry: RetryConfig::default(),
            config,
        })
    }

    /// A catalog with a fresh Graph session
    pub fn catalog(&self) -> Result<MissionCatalog, SyncError> {
        self.config.storage.validate().map_err(SyncError::Config)?;

        Ok(MissionCatalog::new(
            self.drive.connect()?,
            self.storage.clone(),
            self.config.storage.clone(),
            self.config.graph.root_folder_id.clone(),
        ))
    }

    pub fn indexer(&self) -> Result<&Arc<dyn SearchIndexer>, SyncError> {
        match &self.indexer {
            Some(indexer) => Ok(indexer),
            None => Err(SyncError::Validation(
                self.config
                    .search
                    .validate()
                    .err()
                    .unwrap_or_else(|| "Search indexing is not configured".to_string()),
            )),
        }
    }
}

//! Common test utilities and helpers for integration tests
#![allow(dead_code)]

pub mod mocks;
pub mod test_data;

use missionsync_core::catalog::DriveSource;
use missionsync_core::models::{GraphConfig, LlmConfig, SearchConfig, StorageConfig, SyncConfig};
use missionsync_core::services::{InMemoryStorageService, MockMetricsService, SearchIndexer};
use missionsync_core::utils::retry::RetryConfig;
use missionsync_worker::WorkerContext;
use mocks::{MockDrive, MockIndexer, MockStructurer};
use std::sync::Arc;

pub const TEST_BUCKET: &str = "missionsync-media-test";

/// Handles to every collaborator behind a test worker context
pub struct TestHarness {
    pub ctx: WorkerContext,
    pub storage: Arc<InMemoryStorageService>,
    pub structurer: Arc<MockStructurer>,
    pub indexer: Arc<MockIndexer>,
    pub drive: Arc<MockDrive>,
    pub metrics: Arc<MockMetricsService>,
}

pub fn sync_config() -> SyncConfig {
    SyncConfig {
        graph: GraphConfig {
            tenant_id: "tenant".to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            site_id: "site".to_string(),
            drive_id: "drive".to_string(),
            root_folder_id: "root".to_string(),
        },
        storage: StorageConfig {
            bucket: TEST_BUCKET.to_string(),
            ..Default::default()
        },
        llm: LlmConfig::default(),
        search: SearchConfig {
            index: Some("sprintdemos".to_string()),
            uri: Some("https://search.test".to_string()),
            username: Some("admin".to_string()),
            password: Some("pw".to_string()),
        },
    }
}

pub fn harness() -> TestHarness {
    harness_with(sync_config(), true)
}

/// `with_indexer = false` simulates incomplete search settings
pub fn harness_with(config: SyncConfig, with_indexer: bool) -> TestHarness {
    let storage = Arc::new(InMemoryStorageService::new());
    let structurer = Arc::new(MockStructurer::new());
    let indexer = Arc::new(MockIndexer::new());
    let drive = Arc::new(MockDrive::new());
    let metrics = Arc::new(MockMetricsService::new());

    let ctx = WorkerContext {
        config,
        storage: storage.clone(),
        structurer: structurer.clone(),
        indexer: with_indexer.then(|| indexer.clone() as Arc<dyn SearchIndexer>),
        drive: DriveSource::Fixed(drive.clone()),
        metrics: metrics.clone(),
        retry: RetryConfig::new(2, 1, 5),
    };

    TestHarness {
        ctx,
        storage,
        structurer,
        indexer,
        drive,
        metrics,
    }
}

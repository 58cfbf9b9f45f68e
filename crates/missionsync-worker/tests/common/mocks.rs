/// Hand-written mocks for the worker's collaborators
use async_trait::async_trait;
use missionsync_core::SyncError;
use missionsync_core::models::{DriveItem, FolderFacet};
use missionsync_core::services::{DriveService, SearchIndexer, TranscriptStructurer};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Returns a canned document and records every call
pub struct MockStructurer {
    pub calls: Mutex<Vec<(String, String)>>,
    response: Mutex<Option<Value>>,
}

impl MockStructurer {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response: Mutex::new(Some(json!({
                "$entidad": "sprintdemos",
                "sprintdemos_title": "Demostración del sprint",
            }))),
        }
    }

    /// Makes every call fail with an `Llm` error
    pub fn fail(&self) {
        *self.response.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranscriptStructurer for MockStructurer {
    async fn structure(&self, text: &str, video_title: &str) -> Result<Value, SyncError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), video_title.to_string()));

        self.response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| SyncError::Llm("ThrottlingException".to_string()))
    }
}

/// Fails with the queued errors first, then accepts documents
pub struct MockIndexer {
    pub calls: Mutex<Vec<(String, Value)>>,
    failures: Mutex<VecDeque<SyncError>>,
}

impl MockIndexer {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(VecDeque::new()),
        }
    }

    pub fn queue_failure(&self, error: SyncError) {
        self.failures.lock().unwrap().push_back(error);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchIndexer for MockIndexer {
    async fn index_document(&self, doc_id: &str, document: &Value) -> Result<Value, SyncError> {
        self.calls
            .lock()
            .unwrap()
            .push((doc_id.to_string(), document.clone()));

        match self.failures.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(json!({"_id": doc_id, "result": "created"})),
        }
    }
}

/// Folder tree keyed by parent id
#[derive(Default)]
pub struct MockDrive {
    children: Mutex<HashMap<String, Vec<DriveItem>>>,
}

impl MockDrive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, parent: &str, id: &str, name: &str, is_folder: bool) {
        let item = DriveItem {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            folder: is_folder.then(FolderFacet::default),
            ..Default::default()
        };
        let mut children = self.children.lock().unwrap();
        children.entry(parent.to_string()).or_default().push(item);
        if is_folder {
            children.entry(id.to_string()).or_default();
        }
    }
}

#[async_trait]
impl DriveService for MockDrive {
    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveItem>, SyncError> {
        self.children
            .lock()
            .unwrap()
            .get(folder_id)
            .cloned()
            .ok_or_else(|| SyncError::Graph(format!("404 itemNotFound {}", folder_id)))
    }

    async fn get_item(&self, item_id: &str) -> Result<DriveItem, SyncError> {
        Err(SyncError::Graph(format!("404 itemNotFound {}", item_id)))
    }

    async fn download(&self, _url: &str) -> Result<Vec<u8>, SyncError> {
        Err(SyncError::Graph("download not supported".to_string()))
    }
}

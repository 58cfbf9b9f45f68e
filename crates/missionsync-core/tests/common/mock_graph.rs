/// In-memory document library for integration testing
use async_trait::async_trait;
use missionsync_core::SyncError;
use missionsync_core::models::{DriveItem, FileFacet, FolderFacet};
use missionsync_core::services::DriveService;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub struct MockDrive {
    children: Mutex<HashMap<String, Vec<DriveItem>>>,
    items: Mutex<HashMap<String, DriveItem>>,
    content: Mutex<HashMap<String, Vec<u8>>>,
    failing: Mutex<HashSet<String>>,
    list_calls: Mutex<Vec<String>>,
}

impl MockDrive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_folder(&self, parent: &str, id: &str, name: &str) {
        self.add_child(
            parent,
            DriveItem {
                id: Some(id.to_string()),
                name: Some(name.to_string()),
                folder: Some(FolderFacet::default()),
                created_date_time: Some("2025-03-01T10:00:00Z".to_string()),
                ..Default::default()
            },
        );
        self.children
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_default();
    }

    pub fn add_file(&self, parent: &str, id: &str, name: &str) {
        let item = DriveItem {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            web_url: Some(format!("https://contoso.sharepoint.com/{}", id)),
            file: Some(FileFacet::default()),
            download_url: Some(format!("https://download.test/{}", id)),
            ..Default::default()
        };
        self.items
            .lock()
            .unwrap()
            .insert(id.to_string(), item.clone());
        self.add_child(parent, item);
    }

    pub fn add_child(&self, parent: &str, item: DriveItem) {
        self.children
            .lock()
            .unwrap()
            .entry(parent.to_string())
            .or_default()
            .push(item);
    }

    pub fn set_content(&self, item_id: &str, data: &[u8]) {
        self.content
            .lock()
            .unwrap()
            .insert(format!("https://download.test/{}", item_id), data.to_vec());
    }

    /// Makes listing `folder_id` fail
    pub fn fail_folder(&self, folder_id: &str) {
        self.failing.lock().unwrap().insert(folder_id.to_string());
    }

    pub fn list_calls(&self) -> Vec<String> {
        self.list_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DriveService for MockDrive {
    async fn list_children(&self, folder_id: &str) -> Result<Vec<DriveItem>, SyncError> {
        self.list_calls.lock().unwrap().push(folder_id.to_string());

        if self.failing.lock().unwrap().contains(folder_id) {
            return Err(SyncError::Graph(format!("503 listing {}", folder_id)));
        }

        self.children
            .lock()
            .unwrap()
            .get(folder_id)
            .cloned()
            .ok_or_else(|| SyncError::Graph(format!("404 itemNotFound {}", folder_id)))
    }

    async fn get_item(&self, item_id: &str) -> Result<DriveItem, SyncError> {
        self.items
            .lock()
            .unwrap()
            .get(item_id)
            .cloned()
            .ok_or_else(|| SyncError::Graph(format!("404 itemNotFound {}", item_id)))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, SyncError> {
        self.content
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| SyncError::Graph("download failed".to_string()))
    }
}

/// In-memory drive with files that can be fetched and downloaded
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
    failing_downloads: Mutex<HashSet<String>>,
}

impl MockDrive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_folder(&self, parent: &str, id: &str, name: &str) {
        let item = DriveItem {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            folder: Some(FolderFacet::default()),
            created_date_time: Some("2024-03-01T09:30:00Z".to_string()),
            ..Default::default()
        };
        self.insert(parent, item);
        self.children
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_default();
    }

    pub fn add_file(&self, parent: &str, id: &str, name: &str, content: &[u8]) {
        let item = DriveItem {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            web_url: Some(format!("https://sharepoint.test/{}", id)),
            file: Some(FileFacet::default()),
            download_url: Some(format!("https://download.test/{}", id)),
            ..Default::default()
        };
        self.insert(parent, item);
        self.content
            .lock()
            .unwrap()
            .insert(format!("https://download.test/{}", id), content.to_vec());
    }

    /// Makes the download of one item fail
    pub fn fail_download(&self, id: &str) {
        self.failing_downloads
            .lock()
            .unwrap()
            .insert(format!("https://download.test/{}", id));
    }

    fn insert(&self, parent: &str, item: DriveItem) {
        if let Some(id) = item.id.clone() {
            self.items.lock().unwrap().insert(id, item.clone());
        }
        self.children
            .lock()
            .unwrap()
            .entry(parent.to_string())
            .or_default()
            .push(item);
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
        self.items
            .lock()
            .unwrap()
            .get(item_id)
            .cloned()
            .ok_or_else(|| SyncError::Graph(format!("404 itemNotFound {}", item_id)))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, SyncError> {
        if self.failing_downloads.lock().unwrap().contains(url) {
            return Err(SyncError::Graph("Download failed: 503".to_string()));
        }
        self.content
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| SyncError::Graph(format!("Download failed: 404 {}", url)))
    }
}

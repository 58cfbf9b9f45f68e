/// Mission catalog: everything that reads the SharePoint library or the
/// bucket on behalf of reconciliation, metadata collection and transfers.
use crate::constants::{
    JSON_CONTENT_TYPE, MISSION_FETCH_CONCURRENCY, PROCESSED_SUFFIX, TRANSCRIPT_SUBFOLDER,
    VIDEO_SUBFOLDER,
};
use crate::error::SyncError;
use crate::models::{
    DriveItem, GraphConfig, Mission, MissionFolderMetadata, MissionListing, MissionSummary,
    ProcessedSet, StorageConfig, join_key,
};
use crate::normalize::{NormalizedKey, basename, normalize_filename};
use crate::reconcile::reconcile;
use crate::services::{
    ClientCredentialsTokenProvider, DriveService, GraphDriveService, RequestCache, StorageService,
};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// How a catalog reaches the document library
#[derive(Clone)]
pub enum DriveSource {
    /// Microsoft Graph; every connection gets its own token and request cache
    Graph {
        http: reqwest::Client,
        config: GraphConfig,
    },
    /// A pre-built drive service (tests, local runs)
    Fixed(Arc<dyn DriveService>),
}

impl DriveSource {
    pub fn connect(&self) -> Result<Arc<dyn DriveService>, SyncError> {
        match self {
            Self::Graph { http, config } => {
                config.validate().map_err(SyncError::Config)?;
                let tokens = Arc::new(ClientCredentialsTokenProvider::new(http.clone(), config));
                Ok(Arc::new(GraphDriveService::new(
                    http.clone(),
                    config,
                    tokens,
                    RequestCache::default(),
                )))
            }
            Self::Fixed(drive) => Ok(drive.clone()),
        }
    }
}

/// Where the folder metadata document was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderMetadataReport {
    pub location: String,
    pub folder_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferredAsset {
    pub item_id: String,
    pub name: String,
    pub key: String,
    pub size: usize,
}

/// Result of copying one video and its transcript into the bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReport {
    pub video: TransferredAsset,
    pub transcript: TransferredAsset,
}

impl TransferReport {
    pub fn message(&self) -> String {
        format!(
            "Successfully processed '{}' and '{}'",
            self.video.name, self.transcript.name
        )
    }
}

pub struct MissionCatalog {
    drive: Arc<dyn DriveService>,
    storage: Arc<dyn StorageService>,
    layout: StorageConfig,
    root_folder_id: String,
}

impl MissionCatalog {
    pub fn new(
        drive: Arc<dyn DriveService>,
        storage: Arc<dyn StorageService>,
        layout: StorageConfig,
        root_folder_id: impl Into<String>,
    ) -> Self {
        Self {
            drive,
            storage,
            layout,
            root_folder_id: root_folder_id.into(),
        }
    }

    /// First-level folders under the root; failing to list the root is fatal
    pub async fn mission_folders(&self) -> Result<Vec<DriveItem>, SyncError> {
        let children = self
            .drive
            .list_children(&self.root_folder_id)
            .await
            .map_err(|e| SyncError::Fetch(format!("Failed to list mission folders: {}", e)))?;

        let folders: Vec<DriveItem> = children
            .into_iter()
            .filter(|item| item.is_folder() && item.id.is_some())
            .collect();

        info!(count = folders.len(), "Found mission folders");
        Ok(folders)
    }

    /// Lists one mission's subfolders and files.
    ///
    /// Any failure is reported as `PartialFetch` so the caller can skip the
    /// mission. A missing transcript folder is not an error.
    pub async fn mission_listing(&self, folder: &DriveItem) -> Result<MissionListing, SyncError> {
        let name = folder.name.clone().unwrap_or_default();
        let partial = |e: SyncError| SyncError::PartialFetch {
            mission: name.clone(),
            reason: e.to_string(),
        };

        let id = folder.id.clone().ok_or_else(|| SyncError::PartialFetch {
            mission: name.clone(),
            reason: "folder has no id".to_string(),
        })?;

        let children = self.drive.list_children(&id).await.map_err(partial)?;
        let video_folder = find_subfolder(&children, VIDEO_SUBFOLDER).and_then(|f| f.id.clone());
        let transcript_folder =
            find_subfolder(&children, TRANSCRIPT_SUBFOLDER).and_then(|f| f.id.clone());

        let videos = match &video_folder {
            Some(folder_id) => files_in(self.drive.list_children(folder_id).await.map_err(partial)?)
                .filter_map(|item| item.to_video())
                .collect(),
            None => Vec::new(),
        };
        let transcripts = match &transcript_folder {
            Some(folder_id) => files_in(self.drive.list_children(folder_id).await.map_err(partial)?)
                .filter_map(|item| item.to_transcript())
                .collect(),
            None => Vec::new(),
        };

        Ok(MissionListing::new(
            Mission {
                id,
                name,
                video_folder_id: video_folder,
                transcript_folder_id: transcript_folder,
            },
            videos,
            transcripts,
        ))
    }

    /// Listings for every mission, in folder order.
    ///
    /// Missions are fetched concurrently; a mission whose listing fails is
    /// logged and left out.
    pub async fn collect_listings(&self) -> Result<Vec<MissionListing>, SyncError> {
        let folders = self.mission_folders().await?;

        let results: Vec<Result<MissionListing, SyncError>> = stream::iter(folders.iter())
            .map(|folder| self.mission_listing(folder))
            .buffered(MISSION_FETCH_CONCURRENCY)
            .boxed()
            .collect()
            .await;

        Ok(results
            .into_iter()
            .filter_map(|result| match result {
                Ok(listing) => Some(listing),
                Err(e) => {
                    warn!(error = %e, "Skipping mission");
                    None
                }
            })
            .collect())
    }

    /// Normalized names of the structured outputs already in the bucket
    pub async fn processed_set(&self) -> Result<ProcessedSet, SyncError> {
        let keys = self
            .storage
            .list_keys(&self.layout.bucket, &self.layout.json_prefix)
            .await
            .map_err(|e| SyncError::Fetch(format!("Failed to list processed outputs: {}", e)))?;

        let processed: ProcessedSet = keys
            .iter()
            .filter(|key| is_processed_output(key))
            .map(|key| NormalizedKey::from_name(key))
            .collect();

        info!(count = processed.len(), "Loaded processed outputs");
        Ok(processed)
    }

    /// The reconciled view of every mission
    pub async fn reconciled_missions(&self) -> Result<Vec<MissionSummary>, SyncError> {
        let processed = self.processed_set().await?;
        let listings = self.collect_listings().await?;
        Ok(reconcile(&listings, &processed))
    }

    /// Writes name and creation info of every mission folder to the bucket
    pub async fn collect_folder_metadata(&self) -> Result<FolderMetadataReport, SyncError> {
        let metadata: Vec<MissionFolderMetadata> = self
            .mission_folders()
            .await?
            .iter()
            .filter_map(DriveItem::to_folder_metadata)
            .collect();

        let key = self.layout.metadata_key();
        self.storage
            .upload(
                &self.layout.bucket,
                &key,
                serde_json::to_vec(&metadata)?,
                Some(JSON_CONTENT_TYPE),
            )
            .await?;

        let location = format!("s3://{}/{}", self.layout.bucket, key);
        info!(location = %location, count = metadata.len(), "Saved folders metadata");

        Ok(FolderMetadataReport {
            location,
            folder_count: metadata.len(),
        })
    }

    /// Copies a video and its transcript into the bucket.
    ///
    /// Both transfers are attempted; the call succeeds only if both do.
    pub async fn transfer_assets(
        &self,
        video_id: &str,
        transcript_id: &str,
    ) -> Result<TransferReport, SyncError> {
        let (video, transcript) = tokio::join!(
            self.transfer_item(video_id, &self.layout.videos_prefix),
            self.transfer_item(transcript_id, &self.layout.transcripts_prefix),
        );

        match (video, transcript) {
            (Ok(video), Ok(transcript)) => Ok(TransferReport { video, transcript }),
            (video, transcript) => {
                for e in [video.err(), transcript.err()].into_iter().flatten() {
                    error!(error = %e, "Transfer failed");
                }
                Err(SyncError::Storage(
                    "One or more files failed to process.".to_string(),
                ))
            }
        }
    }

    async fn transfer_item(&self, item_id: &str, prefix: &str) -> Result<TransferredAsset, SyncError> {
        let item = self.drive.get_item(item_id).await?;

        let (Some(download_url), Some(name)) = (item.download_url, item.name) else {
            return Err(SyncError::Graph(format!(
                "Missing download URL or filename for item {}",
                item_id
            )));
        };

        let data = self.drive.download(&download_url).await?;
        let size = data.len();
        let key = join_key(prefix, &normalize_filename(&name, true));

        self.storage
            .upload(&self.layout.bucket, &key, data, None)
            .await?;

        info!(item_id = item_id, name = %name, key = %key, "Transferred file");
        Ok(TransferredAsset {
            item_id: item_id.to_string(),
            name,
            key,
            size,
        })
    }
}

/// Case-insensitive lookup of a child folder by name
pub fn find_subfolder<'a>(children: &'a [DriveItem], name: &str) -> Option<&'a DriveItem> {
    children
        .iter()
        .find(|item| item.is_folder() && item.has_name(name))
}

fn files_in(items: Vec<DriveItem>) -> impl Iterator<Item = DriveItem> {
    items.into_iter().filter(|item| !item.is_folder())
}

/// `.json` objects, minus folder placeholders and dot-files
fn is_processed_output(key: &str) -> bool {
    !key.ends_with('/')
        && key.ends_with(PROCESSED_SUFFIX)
        && !basename(key).starts_with('.')
}

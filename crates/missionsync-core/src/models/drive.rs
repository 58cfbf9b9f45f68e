/// Microsoft Graph drive item models
use super::mission::{MissionFolderMetadata, TranscriptAsset, VideoAsset};
use serde::{Deserialize, Serialize};

/// The subset of a Graph `driveItem` read by the fetch layer
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DriveItem {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "webUrl")]
    pub web_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<FolderFacet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<FileFacet>,
    #[serde(rename = "createdDateTime")]
    pub created_date_time: Option<String>,
    #[serde(rename = "createdBy")]
    pub created_by: Option<IdentitySet>,
    #[serde(
        rename = "@microsoft.graph.downloadUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FolderFacet {
    #[serde(rename = "childCount")]
    pub child_count: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileFacet {
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IdentitySet {
    pub user: Option<Identity>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Identity {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

/// A page of drive items
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DriveItemPage {
    #[serde(default)]
    pub value: Vec<DriveItem>,
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

impl DriveItem {
    pub fn is_folder(&self) -> bool {
        self.folder.is_some()
    }

    /// Case-insensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| n.to_lowercase() == name.to_lowercase())
    }

    pub fn created_by_name(&self) -> Option<String> {
        self.created_by
            .as_ref()
            .and_then(|c| c.user.as_ref())
            .and_then(|u| u.display_name.clone())
    }

    /// Converts a listed file into a video asset; items without an id are skipped
    pub fn to_video(&self) -> Option<VideoAsset> {
        Some(VideoAsset {
            id: self.id.clone()?,
            name: self.name.clone().unwrap_or_default(),
            web_url: self.web_url.clone().unwrap_or_default(),
        })
    }

    pub fn to_transcript(&self) -> Option<TranscriptAsset> {
        Some(TranscriptAsset {
            id: self.id.clone()?,
            name: self.name.clone().unwrap_or_default(),
        })
    }

    pub fn to_folder_metadata(&self) -> Option<MissionFolderMetadata> {
        Some(MissionFolderMetadata {
            id: self.id.clone()?,
            name: self.name.clone(),
            created_date_time: self.created_date_time.clone(),
            created_by: self.created_by_name(),
        })
    }
}

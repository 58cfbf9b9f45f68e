/// Mission, asset and reconciliation output models
use crate::normalize::NormalizedKey;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A top-level SharePoint folder representing one recording/shoot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: String,
    pub name: String,
    /// Required for reconciliation; a mission without it is dropped
    pub video_folder_id: Option<String>,
    pub transcript_folder_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoAsset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub web_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptAsset {
    pub id: String,
    pub name: String,
}

/// A mission together with its already-fetched listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionListing {
    pub mission: Mission,
    pub videos: Vec<VideoAsset>,
    pub transcripts: Vec<TranscriptAsset>,
}

impl MissionListing {
    pub fn new(mission: Mission, videos: Vec<VideoAsset>, transcripts: Vec<TranscriptAsset>) -> Self {
        Self {
            mission,
            videos,
            transcripts,
        }
    }
}

/// Normalized keys of outputs that already exist in storage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedSet {
    keys: HashSet<NormalizedKey>,
}

impl ProcessedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key; empty keys are ignored since they can never match
    pub fn insert(&mut self, key: NormalizedKey) -> bool {
        key.is_matchable() && self.keys.insert(key)
    }

    pub fn contains(&self, key: &NormalizedKey) -> bool {
        key.is_matchable() && self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<NormalizedKey> for ProcessedSet {
    fn from_iter<I: IntoIterator<Item = NormalizedKey>>(iter: I) -> Self {
        let mut set = Self::new();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

impl<'a> FromIterator<&'a str> for ProcessedSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        iter.into_iter().map(NormalizedKey::from_name).collect()
    }
}

/// One video in the reconciled view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub video_id: String,
    pub transcript_id: Option<String>,
    pub title: String,
    pub processed: bool,
    pub web_url: String,
    pub mission_id: String,
    pub mission_name: String,
}

/// One mission in the reconciled view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionSummary {
    pub mission_id: String,
    pub mission_name: String,
    pub videos: Vec<VideoRecord>,
    pub video_count: usize,
    pub processed_count: usize,
}

/// Name and creation info of a first-level mission folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionFolderMetadata {
    pub id: String,
    pub name: Option<String>,
    pub created_date_time: Option<String>,
    pub created_by: Option<String>,
}

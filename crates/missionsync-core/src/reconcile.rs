/// Mission reconciliation
///
/// Pairs each SharePoint video with the transcript of the same mission whose
/// normalized name matches, and flags videos whose output already exists in
/// storage. Pure: all listings are fetched beforehand.
use crate::constants::LOG_TARGET_ANOMALY;
use crate::models::{MissionListing, MissionSummary, ProcessedSet, TranscriptAsset, VideoRecord};
use crate::normalize::NormalizedKey;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Reconciles every mission, preserving input order.
///
/// Missions without a video folder or without videos are dropped.
pub fn reconcile(listings: &[MissionListing], processed: &ProcessedSet) -> Vec<MissionSummary> {
    listings
        .iter()
        .filter_map(|listing| reconcile_mission(listing, processed))
        .collect()
}

/// Reconciles a single mission; `None` when the mission is dropped
pub fn reconcile_mission(
    listing: &MissionListing,
    processed: &ProcessedSet,
) -> Option<MissionSummary> {
    let mission = &listing.mission;

    if mission.video_folder_id.is_none() {
        warn!(mission = %mission.name, "No 'video' folder found in mission");
        return None;
    }
    if mission.transcript_folder_id.is_none() {
        warn!(mission = %mission.name, "No 'transcript' folder found in mission");
    }
    if listing.videos.is_empty() {
        debug!(mission = %mission.name, "Mission has no videos, skipping");
        return None;
    }

    let transcripts = transcript_lookup(&mission.name, &listing.transcripts);
    let mut seen_videos = HashSet::with_capacity(listing.videos.len());

    let videos: Vec<VideoRecord> = listing
        .videos
        .iter()
        .map(|video| {
            let key = NormalizedKey::from_name(&video.name);
            if !key.is_matchable() {
                warn!(
                    target: LOG_TARGET_ANOMALY,
                    mission = %mission.name,
                    video = %video.name,
                    "Video name normalizes to an empty key"
                );
            } else if !seen_videos.insert(key.clone()) {
                warn!(
                    target: LOG_TARGET_ANOMALY,
                    mission = %mission.name,
                    video = %video.name,
                    key = %key,
                    "Video names collide within the mission"
                );
            }

            VideoRecord {
                video_id: video.id.clone(),
                transcript_id: transcripts.get(&key).map(|t| t.id.clone()),
                title: video.name.clone(),
                processed: processed.contains(&key),
                web_url: video.web_url.clone(),
                mission_id: mission.id.clone(),
                mission_name: mission.name.clone(),
            }
        })
        .collect();

    let processed_count = videos.iter().filter(|v| v.processed).count();

    Some(MissionSummary {
        mission_id: mission.id.clone(),
        mission_name: mission.name.clone(),
        video_count: videos.len(),
        processed_count,
        videos,
    })
}

/// Builds the normalized-name lookup. On collision the later transcript wins.
fn transcript_lookup<'a>(
    mission: &str,
    transcripts: &'a [TranscriptAsset],
) -> HashMap<NormalizedKey, &'a TranscriptAsset> {
    let mut lookup = HashMap::with_capacity(transcripts.len());

    for transcript in transcripts {
        let key = NormalizedKey::from_name(&transcript.name);
        if !key.is_matchable() {
            warn!(
                target: LOG_TARGET_ANOMALY,
                mission = %mission,
                transcript = %transcript.name,
                "Transcript name normalizes to an empty key"
            );
            continue;
        }

        if let Some(previous) = lookup.insert(key.clone(), transcript) {
            warn!(
                target: LOG_TARGET_ANOMALY,
                mission = %mission,
                key = %key,
                replaced = %previous.name,
                kept = %transcript.name,
                "Transcript names collide, keeping the later one"
            );
        }
    }

    lookup
}

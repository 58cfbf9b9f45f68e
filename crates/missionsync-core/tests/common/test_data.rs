/// Test data builders
use super::mock_graph::MockDrive;
use super::{ROOT_FOLDER, TEST_BUCKET};
use missionsync_core::models::StorageConfig;

pub fn storage_layout() -> StorageConfig {
    StorageConfig {
        bucket: TEST_BUCKET.to_string(),
        metadata_prefix: "json/videos/".to_string(),
        ..Default::default()
    }
}

/// Adds a mission folder with `video` and `transcript` subfolders
pub fn add_mission(drive: &MockDrive, id: &str, name: &str, videos: &[&str], transcripts: &[&str]) {
    drive.add_folder(ROOT_FOLDER, id, name);
    let video_folder = format!("{}-video", id);
    let transcript_folder = format!("{}-transcript", id);
    drive.add_folder(id, &video_folder, "video");
    drive.add_folder(id, &transcript_folder, "Transcript");

    for (i, name) in videos.iter().enumerate() {
        drive.add_file(&video_folder, &format!("{}-v{}", id, i), name);
    }
    for (i, name) in transcripts.iter().enumerate() {
        drive.add_file(&transcript_folder, &format!("{}-t{}", id, i), name);
    }
}

//! Common test utilities and helpers for integration tests
#![allow(dead_code)]

pub mod mock_graph;
pub mod test_data;

pub const TEST_BUCKET: &str = "missionsync-media-test";
pub const ROOT_FOLDER: &str = "root";

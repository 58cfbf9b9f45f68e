pub mod config;
/// Data models for Missionsync
pub mod drive;
pub mod events;
pub mod mission;

// Re-export commonly used types
pub use config::*;
pub use drive::*;
pub use events::*;
pub use mission::*;

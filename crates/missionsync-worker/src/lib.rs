/// Missionsync Worker - event-driven Lambda
///
/// Structures uploaded transcripts, indexes structured documents and runs
/// catalog operations on direct invocation.
pub mod context;
pub mod handlers;

// Re-export commonly used items
pub use context::WorkerContext;
pub use handlers::handler;
pub use missionsync_core::*;

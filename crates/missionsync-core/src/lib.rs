/// Missionsync Core - Shared library for the Missionsync Lambda functions
///
/// This crate contains the filename normalizer, the mission reconciler and
/// the fetch/transform services shared by the worker and API Lambdas.
pub mod catalog;
pub mod constants;
pub mod error;
pub mod models;
pub mod normalize;
pub mod reconcile;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use error::SyncError;
pub use normalize::{NormalizedKey, normalize_filename};
pub use reconcile::reconcile;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Utility modules
pub mod docx;
pub mod logging;
pub mod retry;

pub use docx::*;
pub use logging::*;
pub use retry::*;

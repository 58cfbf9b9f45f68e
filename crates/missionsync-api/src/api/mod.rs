/// API endpoint modules
pub mod health;
pub mod missions;
pub mod transfer;

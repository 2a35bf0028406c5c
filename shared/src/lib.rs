//! Shared types for the booking bot
//!
//! Data model for the menu and booking documents plus the unified
//! error system used by the action crate.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};

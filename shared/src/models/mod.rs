//! Data models
//!
//! JSON document shapes for the menu and bookings files.

pub mod booking;
pub mod menu;

// Re-exports
pub use booking::*;
pub use menu::*;

//! Unified error system for the booking bot
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Response envelope for failures reported outside an action
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 2xxx: Booking errors
//! - 3xxx: Notification errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::StorageWriteFailed);
//! assert_eq!(err.code.code(), 9003);
//!
//! let err = AppError::validation("Phone must have 10 digits")
//!     .with_detail("field", "phone");
//!
//! let response = ApiResponse::error(&err);
//! assert_eq!(response.code, 2);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};

//! Unified error codes for the booking bot
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Booking errors
//! - 3xxx: Notification errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values so the runner can emit them as plain numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 2xxx: Booking ====================
    /// Booking date outside the bookable range
    BookingDateOutOfRange = 2002,
    /// Booking time outside business hours
    BookingOutsideHours = 2003,
    /// Party size outside the accepted range
    PartySizeOutOfRange = 2004,
    /// Phone number cannot be normalized
    PhoneInvalid = 2005,
    /// Booking id collided with an existing record
    BookingIdCollision = 2006,

    // ==================== 3xxx: Notification ====================
    /// Messaging provider is not configured
    NotifierNotConfigured = 3001,
    /// Messaging provider rejected or failed the send
    NotificationFailed = 3002,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Storage read failed
    StorageReadFailed = 9002,
    /// Storage write failed
    StorageWriteFailed = 9003,
    /// Action name not registered
    ActionNotFound = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Booking
            ErrorCode::BookingDateOutOfRange => "Booking date is outside the bookable range",
            ErrorCode::BookingOutsideHours => "Booking time is outside business hours",
            ErrorCode::PartySizeOutOfRange => "Party size is out of range",
            ErrorCode::PhoneInvalid => "Phone number is invalid",
            ErrorCode::BookingIdCollision => "Could not allocate a unique booking id",

            // Notification
            ErrorCode::NotifierNotConfigured => "Messaging provider is not configured",
            ErrorCode::NotificationFailed => "Notification delivery failed",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::StorageReadFailed => "Failed to read storage",
            ErrorCode::StorageWriteFailed => "Failed to write storage",
            ErrorCode::ActionNotFound => "Action not found",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when a u16 does not map to a known [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            2002 => Ok(ErrorCode::BookingDateOutOfRange),
            2003 => Ok(ErrorCode::BookingOutsideHours),
            2004 => Ok(ErrorCode::PartySizeOutOfRange),
            2005 => Ok(ErrorCode::PhoneInvalid),
            2006 => Ok(ErrorCode::BookingIdCollision),

            3001 => Ok(ErrorCode::NotifierNotConfigured),
            3002 => Ok(ErrorCode::NotificationFailed),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageReadFailed),
            9003 => Ok(ErrorCode::StorageWriteFailed),
            9005 => Ok(ErrorCode::ActionNotFound),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

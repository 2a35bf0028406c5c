//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 2xxx: Booking errors
/// - 3xxx: Notification errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Booking errors (2xxx)
    Booking,
    /// Notification errors (3xxx)
    Notification,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            2000..3000 => Self::Booking,
            3000..4000 => Self::Notification,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Booking => "booking",
            Self::Notification => "notification",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(2), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1002), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(2004), ErrorCategory::Booking);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Notification);
        assert_eq!(ErrorCategory::from_code(9003), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(5000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::PhoneInvalid.category(), ErrorCategory::Booking);
        assert_eq!(ErrorCode::StorageWriteFailed.category(), ErrorCategory::System);
        assert_eq!(ErrorCode::NotificationFailed.category(), ErrorCategory::Notification);
        assert_eq!(ErrorCategory::Notification.name(), "notification");
    }
}

use async_trait::async_trait;
use shared::models::BookingRecord;

use super::{Notifier, NotifyOutcome};

/// Used when no messaging provider is configured
#[derive(Debug, Clone)]
pub struct NoopNotifier {
    reason: String,
}

impl NoopNotifier {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Notifier for NoopNotifier {
    fn kind(&self) -> &'static str {
        "noop"
    }

    async fn send_confirmation(&self, booking: &BookingRecord) -> NotifyOutcome {
        tracing::info!(
            booking_id = %booking.booking_id,
            reason = %self.reason,
            "Skipping confirmation SMS"
        );
        NotifyOutcome::Skipped {
            reason: self.reason.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::tests::sample_booking;

    #[tokio::test]
    async fn test_noop_skips() {
        let notifier = NoopNotifier::new("messaging is not configured");
        let outcome = notifier.send_confirmation(&sample_booking()).await;
        assert_eq!(
            outcome,
            NotifyOutcome::Skipped {
                reason: "messaging is not configured".into()
            }
        );
    }
}

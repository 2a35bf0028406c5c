//! Twilio SMS via REST API (no SDK dependency)

use async_trait::async_trait;
use serde::Deserialize;
use shared::error::ErrorCode;
use shared::models::BookingRecord;
use std::time::Duration;
use thiserror::Error;

use super::{Notifier, NotifyOutcome, confirmation_body};
use crate::core::SmsConfig;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("SMS is not configured: missing {0}")]
    NotConfigured(&'static str),

    #[error("Cannot send SMS to '{0}': not a valid phone number")]
    InvalidPhone(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider rejected message (HTTP {status}): {message}")]
    Provider { status: u16, message: String },
}

impl NotifyError {
    pub fn code(&self) -> ErrorCode {
        match self {
            NotifyError::NotConfigured(_) => ErrorCode::NotifierNotConfigured,
            _ => ErrorCode::NotificationFailed,
        }
    }
}

/// Stored phone → E.164: 10 digits get `+91`, 11 to 15 digits get `+`.
pub fn to_e164(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        10 => Some(format!("+91{digits}")),
        11..=15 => Some(format!("+{digits}")),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    message: Option<String>,
}

pub struct TwilioNotifier {
    client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
    api_base: String,
}

impl TwilioNotifier {
    pub fn from_config(config: &SmsConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            account_sid: config
                .account_sid
                .clone()
                .ok_or(NotifyError::NotConfigured("TWILIO_ACCOUNT_SID"))?,
            auth_token: config
                .auth_token
                .clone()
                .ok_or(NotifyError::NotConfigured("TWILIO_AUTH_TOKEN"))?,
            from_number: config
                .from_number
                .clone()
                .ok_or(NotifyError::NotConfigured("TWILIO_FROM_NUMBER"))?,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base, self.account_sid
        )
    }

    /// Send one SMS, returning the provider's message sid
    pub async fn send_sms(&self, to: &str, body: &str) -> Result<Option<String>, NotifyError> {
        let resp = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[("To", to), ("From", self.from_number.as_str()), ("Body", body)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&text)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or(text);
            return Err(NotifyError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let message: MessageResource = resp.json().await?;
        Ok(message.sid)
    }
}

#[async_trait]
impl Notifier for TwilioNotifier {
    fn kind(&self) -> &'static str {
        "twilio"
    }

    async fn send_confirmation(&self, booking: &BookingRecord) -> NotifyOutcome {
        let Some(to) = to_e164(&booking.phone) else {
            let error = NotifyError::InvalidPhone(booking.phone.clone());
            tracing::warn!(booking_id = %booking.booking_id, error = %error, "Confirmation SMS not sent");
            return NotifyOutcome::Failed {
                code: error.code(),
                error: error.to_string(),
            };
        };

        match self.send_sms(&to, &confirmation_body(booking)).await {
            Ok(message_id) => {
                tracing::info!(
                    booking_id = %booking.booking_id,
                    to = %to,
                    message_id = ?message_id,
                    "Confirmation SMS sent"
                );
                NotifyOutcome::Sent { to, message_id }
            }
            Err(e) => {
                tracing::error!(
                    booking_id = %booking.booking_id,
                    to = %to,
                    code = %e.code(),
                    error = %e,
                    "Failed to send confirmation SMS"
                );
                NotifyOutcome::Failed {
                    code: e.code(),
                    error: e.to_string(),
                }
            }
        }
    }
}

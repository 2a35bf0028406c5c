//! 预订确认通知 (短信)
//!
//! 通知是附加功能：发送失败只报告给用户，绝不回滚已保存的预订。
//! 具体实现在启动时根据配置选择一次：
//!
//! - [`TwilioNotifier`] - 凭证齐全时通过 Twilio REST API 发送
//! - [`NoopNotifier`] - 未配置时只记录日志

pub mod noop;
pub mod twilio;

pub use noop::NoopNotifier;
pub use twilio::{NotifyError, TwilioNotifier, to_e164};

use async_trait::async_trait;
use shared::error::ErrorCode;
use shared::models::BookingRecord;
use std::sync::Arc;

use crate::core::SmsConfig;

/// 一次通知的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// 已被服务商接受
    Sent {
        to: String,
        message_id: Option<String>,
    },
    /// 未尝试发送
    Skipped { reason: String },
    /// 发送失败 (预订已保存)
    Failed { code: ErrorCode, error: String },
}

impl NotifyOutcome {
    /// 未发送时的错误码
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            NotifyOutcome::Sent { .. } => None,
            NotifyOutcome::Skipped { .. } => Some(ErrorCode::NotifierNotConfigured),
            NotifyOutcome::Failed { code, .. } => Some(*code),
        }
    }
}

/// 预订确认发送方
#[async_trait]
pub trait Notifier: Send + Sync {
    /// 实现名称 (日志用)
    fn kind(&self) -> &'static str;

    /// 发送确认，任何失败都折叠为 [`NotifyOutcome::Failed`]
    async fn send_confirmation(&self, booking: &BookingRecord) -> NotifyOutcome;
}

/// 短信正文
pub fn confirmation_body(booking: &BookingRecord) -> String {
    format!(
        "Booking confirmed: {}\nName: {}\nDate: {} Time: {}\nParty: {}\nRequests: {}",
        booking.booking_id,
        booking.name,
        booking.date,
        booking.time,
        booking.party_size,
        booking.special_request.as_deref().unwrap_or("None")
    )
}

/// 根据配置选择实现
pub fn notifier_from_config(config: &SmsConfig) -> Arc<dyn Notifier> {
    if !config.is_configured() {
        tracing::info!("SMS credentials not configured, confirmations will not be sent");
        return Arc::new(NoopNotifier::new("messaging is not configured"));
    }

    match TwilioNotifier::from_config(config) {
        Ok(notifier) => {
            tracing::info!(api_base = %config.api_base, "SMS confirmations enabled");
            Arc::new(notifier)
        }
        Err(e) => {
            tracing::error!(code = %e.code(), error = %e, "Failed to build SMS client, confirmations disabled");
            Arc::new(NoopNotifier::new(format!("messaging client unavailable: {e}")))
        }
    }
}

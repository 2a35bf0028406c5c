//! 时间工具函数 (营业时间与餐厅时区)
//!
//! "今天" 一律按餐厅所在时区 (固定 UTC 偏移) 计算，
//! 营业时间窗口允许跨越午夜 (例如 07:30 开门、次日 01:30 打烊)。

use chrono::{FixedOffset, NaiveDate, NaiveTime, Offset, Utc};

/// 用户输入与展示使用的时间格式
pub const HHMM_FORMAT: &str = "%H:%M";

/// 解析 HH:MM，失败时回退到默认值并记录警告
pub fn parse_hhmm_or(value: &str, fallback: NaiveTime) -> NaiveTime {
    NaiveTime::parse_from_str(value.trim(), HHMM_FORMAT).unwrap_or_else(|e| {
        tracing::warn!(
            "Failed to parse business time '{}': {}, falling back to {}",
            value,
            fallback.format(HHMM_FORMAT),
            e
        );
        fallback
    })
}

/// UTC 偏移 (分钟) → FixedOffset，越界时回退到 UTC
pub fn business_offset(utc_offset_minutes: i32) -> FixedOffset {
    utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| {
            tracing::warn!(
                utc_offset_minutes,
                "UTC offset out of range, falling back to UTC"
            );
            Utc.fix()
        })
}

/// 餐厅时区的今天
pub fn business_today(offset: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&offset).date_naive()
}

/// 营业时间窗口 (两端都包含)
///
/// `open <= close` → 普通区间；`open > close` → 跨午夜，
/// 合法条件为 `time >= open || time <= close`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl BusinessHours {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Self {
        Self { open, close }
    }

    /// 是否跨越午夜
    pub fn wraps_midnight(&self) -> bool {
        self.open > self.close
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.wraps_midnight() {
            time >= self.open || time <= self.close
        } else {
            self.open <= time && time <= self.close
        }
    }

    /// 24 小时制描述，例如 `07:30 to 01:30 (next day)`
    pub fn describe(&self) -> String {
        let mut text = format!(
            "{} to {}",
            self.open.format(HHMM_FORMAT),
            self.close.format(HHMM_FORMAT)
        );
        if self.wraps_midnight() {
            text.push_str(" (next day)");
        }
        text
    }

    /// 12 小时制描述，例如 `07:30 AM - 01:30 AM (next day)`
    pub fn describe_12h(&self) -> String {
        let mut text = format!(
            "{} - {}",
            self.open.format("%I:%M %p"),
            self.close.format("%I:%M %p")
        );
        if self.wraps_midnight() {
            text.push_str(" (next day)");
        }
        text
    }
}

use chrono::{FixedOffset, NaiveDate, NaiveTime};
use std::path::PathBuf;

use crate::storage::StorageConfig;
use crate::utils::time::{BusinessHours, business_offset, business_today, parse_hhmm_or};

/// 动作服务配置 - 每个进程初始化一次
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (启动时会先读取 `.env`)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | DATA_DIR | backend_data | 数据目录 (menu.json / bookings.json) |
/// | MENU_FILE | menu.json | 菜单文件名 |
/// | BOOKINGS_FILE | bookings.json | 预订文件名 |
/// | OPENING_TIME | 07:30 | 开门时间 (HH:MM) |
/// | CLOSING_TIME | 01:30 | 打烊时间 (HH:MM)，可早于开门时间 (跨午夜) |
/// | BOOKING_HORIZON_DAYS | 90 | 最远可预订天数 |
/// | MAX_PARTY_SIZE | 20 | 单笔预订最大人数，不超过 20 |
/// | UTC_OFFSET_MINUTES | 330 | 餐厅时区偏移 (分钟) |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 日志目录 (存在时按天滚动写文件) |
/// | TWILIO_ACCOUNT_SID / TWILIO_AUTH_TOKEN / TWILIO_FROM_NUMBER | - | 短信凭证，三者齐全才发送 |
/// | TWILIO_API_BASE | https://api.twilio.com | 短信 API 地址 |
/// | SMS_TIMEOUT_MS | 10000 | 短信请求超时 (毫秒) |
///
/// # 示例
///
/// ```ignore
/// DATA_DIR=/srv/bot/data OPENING_TIME=11:00 CLOSING_TIME=23:00 bot-actions < request.json
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 数据目录
    pub data_dir: String,
    /// 菜单文件名 (位于 data_dir 内)
    pub menu_file: String,
    /// 预订文件名 (位于 data_dir 内)
    pub bookings_file: String,
    /// 开门时间
    pub opening_time: NaiveTime,
    /// 打烊时间
    pub closing_time: NaiveTime,
    /// 最远可预订天数
    pub booking_horizon_days: i64,
    /// 单笔预订最大人数
    pub max_party_size: u32,
    /// 餐厅时区偏移 (分钟)
    pub utc_offset_minutes: i32,
    /// 地址、地图链接、电话
    pub restaurant: RestaurantInfo,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
    /// 短信配置
    pub sms: SmsConfig,
}

/// 餐厅联系信息 (location 动作使用)
#[derive(Debug, Clone)]
pub struct RestaurantInfo {
    pub address: String,
    pub maps_link: String,
    pub phone: String,
}

/// 短信服务配置
///
/// 三个凭证字段同时存在时才启用真实发送。
#[derive(Clone)]
pub struct SmsConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    pub from_number: Option<String>,
    pub api_base: String,
    pub timeout_ms: u64,
}

impl SmsConfig {
    /// 未配置时的默认值
    pub fn disabled() -> Self {
        Self {
            account_sid: None,
            auth_token: None,
            from_number: None,
            api_base: DEFAULT_TWILIO_API_BASE.to_string(),
            timeout_ms: DEFAULT_SMS_TIMEOUT_MS,
        }
    }

    /// 凭证是否齐全
    pub fn is_configured(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some() && self.from_number.is_some()
    }
}

// auth_token 不能出现在日志里
impl std::fmt::Debug for SmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "***"))
            .field("from_number", &self.from_number)
            .field("api_base", &self.api_base)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

pub const DEFAULT_TWILIO_API_BASE: &str = "https://api.twilio.com";
pub const DEFAULT_SMS_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_BOOKING_HORIZON_DAYS: i64 = 90;
/// Hard upper bound of a booking's party size; `MAX_PARTY_SIZE` may only lower it
pub const PARTY_SIZE_LIMIT: u32 = 20;
pub const DEFAULT_MAX_PARTY_SIZE: u32 = PARTY_SIZE_LIMIT;
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

const DEFAULT_ADDRESS: &str = "C BLOCK , AECS Layout Brookfield,Bengaluru,Karnataka-560037";
const DEFAULT_MAPS_LINK: &str = "https://maps.app.goo.gl/kx6BaHaazrM1aBA6A?g_st=aw";
const DEFAULT_PHONE: &str = "+91-0000000000";

fn default_opening_time() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 30, 0).unwrap_or(NaiveTime::MIN)
}

fn default_closing_time() -> NaiveTime {
    NaiveTime::from_hms_opt(1, 30, 0).unwrap_or(NaiveTime::MIN)
}

/// `MAX_PARTY_SIZE` 解析，超出 1..=20 或无法解析时回退到默认值
pub fn parse_party_limit(value: &str) -> u32 {
    match value.trim().parse::<u32>() {
        Ok(limit) if (1..=PARTY_SIZE_LIMIT).contains(&limit) => limit,
        Ok(limit) => {
            tracing::warn!(
                limit,
                max = PARTY_SIZE_LIMIT,
                "MAX_PARTY_SIZE out of range, falling back to {}",
                DEFAULT_MAX_PARTY_SIZE
            );
            DEFAULT_MAX_PARTY_SIZE
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse MAX_PARTY_SIZE '{}': {}, falling back to {}",
                value,
                e,
                DEFAULT_MAX_PARTY_SIZE
            );
            DEFAULT_MAX_PARTY_SIZE
        }
    }
}

/// 读取非空环境变量
fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "backend_data".into()),
            menu_file: std::env::var("MENU_FILE").unwrap_or_else(|_| "menu.json".into()),
            bookings_file: std::env::var("BOOKINGS_FILE")
                .unwrap_or_else(|_| "bookings.json".into()),
            opening_time: env_non_empty("OPENING_TIME")
                .map(|v| parse_hhmm_or(&v, default_opening_time()))
                .unwrap_or_else(default_opening_time),
            closing_time: env_non_empty("CLOSING_TIME")
                .map(|v| parse_hhmm_or(&v, default_closing_time()))
                .unwrap_or_else(default_closing_time),
            booking_horizon_days: std::env::var("BOOKING_HORIZON_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_BOOKING_HORIZON_DAYS),
            max_party_size: env_non_empty("MAX_PARTY_SIZE")
                .map(|v| parse_party_limit(&v))
                .unwrap_or(DEFAULT_MAX_PARTY_SIZE),
            utc_offset_minutes: std::env::var("UTC_OFFSET_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_UTC_OFFSET_MINUTES),
            restaurant: RestaurantInfo {
                address: env_non_empty("RESTAURANT_ADDRESS")
                    .unwrap_or_else(|| DEFAULT_ADDRESS.into()),
                maps_link: env_non_empty("RESTAURANT_MAPS_LINK")
                    .unwrap_or_else(|| DEFAULT_MAPS_LINK.into()),
                phone: env_non_empty("RESTAURANT_PHONE").unwrap_or_else(|| DEFAULT_PHONE.into()),
            },
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: env_non_empty("LOG_DIR"),
            sms: SmsConfig {
                account_sid: env_non_empty("TWILIO_ACCOUNT_SID"),
                auth_token: env_non_empty("TWILIO_AUTH_TOKEN"),
                from_number: env_non_empty("TWILIO_FROM_NUMBER"),
                api_base: env_non_empty("TWILIO_API_BASE")
                    .unwrap_or_else(|| DEFAULT_TWILIO_API_BASE.into()),
                timeout_ms: std::env::var("SMS_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_SMS_TIMEOUT_MS),
            },
        }
    }

    /// 不读取环境变量的默认配置，数据目录由调用方指定
    ///
    /// 常用于测试场景 (短信始终关闭)
    pub fn with_data_dir(data_dir: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            menu_file: "menu.json".into(),
            bookings_file: "bookings.json".into(),
            opening_time: default_opening_time(),
            closing_time: default_closing_time(),
            booking_horizon_days: DEFAULT_BOOKING_HORIZON_DAYS,
            max_party_size: DEFAULT_MAX_PARTY_SIZE,
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            restaurant: RestaurantInfo {
                address: DEFAULT_ADDRESS.into(),
                maps_link: DEFAULT_MAPS_LINK.into(),
                phone: DEFAULT_PHONE.into(),
            },
            log_level: "info".into(),
            log_dir: None,
            sms: SmsConfig::disabled(),
        }
    }

    /// 存储配置 (文件路径)
    pub fn storage(&self) -> StorageConfig {
        let data_dir = PathBuf::from(&self.data_dir);
        StorageConfig {
            menu_file: data_dir.join(&self.menu_file),
            bookings_file: data_dir.join(&self.bookings_file),
            data_dir,
        }
    }

    /// 营业时间窗口
    pub fn business_hours(&self) -> BusinessHours {
        BusinessHours::new(self.opening_time, self.closing_time)
    }

    /// 餐厅时区
    pub fn offset(&self) -> FixedOffset {
        business_offset(self.utc_offset_minutes)
    }

    /// 餐厅时区的今天
    pub fn today(&self) -> NaiveDate {
        business_today(self.offset())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_data_dir_defaults() {
        let config = Config::with_data_dir("/tmp/bot-data");
        assert_eq!(config.booking_horizon_days, 90);
        assert_eq!(config.max_party_size, 20);
        assert!(config.business_hours().wraps_midnight());
        assert!(!config.sms.is_configured());

        let storage = config.storage();
        assert_eq!(storage.bookings_file, PathBuf::from("/tmp/bot-data/bookings.json"));
        assert_eq!(storage.menu_file, PathBuf::from("/tmp/bot-data/menu.json"));
    }

    #[test]
    fn test_party_limit_never_exceeds_twenty() {
        assert_eq!(parse_party_limit("12"), 12);
        assert_eq!(parse_party_limit(" 20 "), 20);
        assert_eq!(parse_party_limit("50"), DEFAULT_MAX_PARTY_SIZE);
        assert_eq!(parse_party_limit("0"), DEFAULT_MAX_PARTY_SIZE);
        assert_eq!(parse_party_limit("-3"), DEFAULT_MAX_PARTY_SIZE);
        assert_eq!(parse_party_limit("lots"), DEFAULT_MAX_PARTY_SIZE);
    }

    #[test]
    fn test_sms_config_requires_all_credentials() {
        let mut sms = SmsConfig::disabled();
        sms.account_sid = Some("AC123".into());
        sms.auth_token = Some("secret".into());
        assert!(!sms.is_configured());
        sms.from_number = Some("+15005550006".into());
        assert!(sms.is_configured());
    }

    #[test]
    fn test_sms_config_debug_hides_token() {
        let mut sms = SmsConfig::disabled();
        sms.auth_token = Some("super-secret".into());
        let debug = format!("{:?}", sms);
        assert!(!debug.contains("super-secret"));
    }
}

//! 核心模块 - 配置与运行状态
//!
//! # 模块结构
//!
//! - [`Config`] - 环境变量配置
//! - [`ActionState`] - 动作运行时依赖 (菜单、预订、校验、通知)

pub mod config;
pub mod state;

pub use config::{Config, RestaurantInfo, SmsConfig};
pub use state::ActionState;

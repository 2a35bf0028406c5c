//! Bot Actions - 餐厅聊天机器人业务动作
//!
//! # 架构概述
//!
//! 对话引擎每轮调用一个动作；本 crate 负责动作背后的业务逻辑：
//!
//! - **存储** (`storage`): JSON 文档 (菜单、预订)，原子写入与损坏隔离
//! - **菜单** (`menu`): 展开、按名称查找、文本与卡片渲染
//! - **预订** (`booking`): 字段校验、预订号分配、追加写入
//! - **通知** (`notify`): 预订确认短信 (Twilio)，失败不影响预订
//! - **动作** (`actions`): 对外的动作名称与请求/响应格式
//!
//! # 模块结构
//!
//! ```text
//! bot-actions/src/
//! ├── core/          # 配置、运行状态
//! ├── storage/       # JSON 文件读写
//! ├── menu/          # 菜单查询与展示
//! ├── booking/       # 表单校验、预订写入
//! ├── notify/        # 短信通知
//! ├── actions/       # 动作实现与分发
//! └── utils/         # 日志、时间、文本校验
//! ```

pub mod actions;
pub mod booking;
pub mod core;
pub mod menu;
pub mod notify;
pub mod storage;
pub mod utils;

// Re-export 公共类型
pub use actions::{ActionRequest, ActionResponse, BotAction, dispatch};
pub use core::{ActionState, Config};
pub use notify::{Notifier, NotifyOutcome};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 设置运行环境
///
/// 1. 读取 `.env` (存在时)
/// 2. 从环境变量加载配置
/// 3. 初始化日志
pub fn setup_environment() -> Config {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    tracing::debug!(?config, "Configuration loaded");
    config
}

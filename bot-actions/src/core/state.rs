use chrono::NaiveDate;
use std::sync::Arc;

use super::Config;
use crate::booking::{BookingValidator, BookingWriter};
use crate::menu::MenuService;
use crate::notify::{Notifier, notifier_from_config};

/// 动作运行状态
///
/// 每个进程初始化一次，所有动作共享。文件路径与短信实现在这里固定，
/// 之后不再读取环境变量。
///
/// # 示例
///
/// ```ignore
/// let state = ActionState::initialize(Config::from_env());
/// let response = bot_actions::actions::dispatch(&state, &request).await?;
/// ```
#[derive(Clone)]
pub struct ActionState {
    /// 配置
    pub config: Arc<Config>,
    /// 菜单查询
    pub menu: MenuService,
    /// 预订写入
    pub bookings: BookingWriter,
    /// 表单字段校验
    pub validator: BookingValidator,
    /// 短信通知 (启动时选定)
    pub notifier: Arc<dyn Notifier>,
}

impl ActionState {
    /// 初始化运行状态，通知实现由短信配置决定
    pub fn initialize(config: Config) -> Self {
        let notifier = notifier_from_config(&config.sms);
        Self::with_notifier(config, notifier)
    }

    /// 使用指定的通知实现 (测试中注入替身)
    pub fn with_notifier(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        let storage = config.storage();
        tracing::debug!(
            data_dir = %storage.data_dir.display(),
            notifier = notifier.kind(),
            "Action state initialized"
        );
        Self {
            menu: MenuService::new(&storage),
            bookings: BookingWriter::new(&storage),
            validator: BookingValidator::from_config(&config),
            notifier,
            config: Arc::new(config),
        }
    }

    /// 餐厅时区的今天
    pub fn today(&self) -> NaiveDate {
        self.config.today()
    }
}

impl std::fmt::Debug for ActionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionState")
            .field("config", &self.config)
            .field("notifier", &self.notifier.kind())
            .finish_non_exhaustive()
    }
}

//! 存储层 - JSON 文件文档
//!
//! # 模块结构
//!
//! - [`json_file`] - 原子写入、加载/隔离损坏文件
//! - [`BookingRepository`] - 预订文档 (`bookings.json`)
//! - [`MenuRepository`] - 菜单文档 (`menu.json`，只读)
//!
//! 没有文件锁：并发写入在 rename 上竞争时后写者覆盖先写者。

pub mod bookings;
pub mod json_file;
pub mod menu;

pub use bookings::BookingRepository;
pub use json_file::{atomic_write, load_document, read_document};
pub use menu::MenuRepository;

use std::path::{Path, PathBuf};

/// 存储路径配置 (由 [`crate::Config::storage`] 构建)
///
/// 目录在首次访问时才创建。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub menu_file: PathBuf,
    pub bookings_file: PathBuf,
}

impl StorageConfig {
    /// 以同一目录下的默认文件名构建
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Self {
            menu_file: data_dir.join("menu.json"),
            bookings_file: data_dir.join("bookings.json"),
            data_dir,
        }
    }
}

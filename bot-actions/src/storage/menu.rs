//! 菜单文档仓库 (只读)
//!
//! 菜单由运营人员维护，缺失或损坏时返回空菜单，不改动原文件。

use shared::models::{MenuDocument, MenuFile};
use std::path::{Path, PathBuf};

use super::StorageConfig;
use super::json_file::read_document;

#[derive(Debug, Clone)]
pub struct MenuRepository {
    path: PathBuf,
}

impl MenuRepository {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            path: config.menu_file.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 分类 → 菜品 (保持文档顺序)
    pub fn load_grouped(&self) -> MenuDocument {
        read_document::<MenuFile>(&self.path)
            .map(MenuFile::into_grouped)
            .unwrap_or_default()
    }
}

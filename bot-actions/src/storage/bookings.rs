//! 预订文档仓库
//!
//! `bookings.json` 的读写。旧版扁平数组文件在读取时升级为
//! `{"bookings": [...]}`，下一次写入时落盘为新格式。
//!
//! 无法解析的单条记录会被跳过并记录日志；原文件先复制一份备份，
//! 所以下一次写入不会让这些记录彻底丢失。

use shared::models::{BookingRecord, BookingStore, BookingsFile};
use std::path::{Path, PathBuf};

use super::StorageConfig;
use super::json_file::{atomic_write, load_document, preserve_copy};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct BookingRepository {
    path: PathBuf,
}

impl BookingRepository {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            path: config.bookings_file.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 加载全部预订 (不存在则创建空文档，损坏则隔离后重置)
    pub fn load(&self) -> AppResult<BookingStore> {
        let file = load_document::<BookingsFile, _>(&self.path, BookingsFile::default)?;
        let (store, skipped) = file.into_parts();
        if skipped.is_empty() {
            return Ok(store);
        }

        for row in &skipped {
            tracing::warn!(
                path = %self.path.display(),
                index = row.index,
                booking_id = row.booking_id.as_deref().unwrap_or("-"),
                error = %row.error,
                "Skipping unreadable booking record"
            );
        }
        let backup = preserve_copy(&self.path);
        tracing::warn!(
            kept = store.len(),
            skipped = skipped.len(),
            backup = ?backup,
            "Bookings loaded with unreadable records"
        );
        Ok(store)
    }

    /// 原子写入整个文档
    pub fn save(&self, store: &BookingStore) -> AppResult<()> {
        atomic_write(&self.path, store).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to persist bookings");
            AppError::storage_write(format!("Failed to write bookings: {}", e))
                .with_detail("path", self.path.display().to_string())
        })
    }

    /// 追加一条记录并写回整个文档，返回写入后的文档
    pub fn append(&self, record: BookingRecord) -> AppResult<BookingStore> {
        let mut store = self.load()?;
        store.bookings.push(record);
        self.save(&store)?;
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json_file::{BACKUP_SUFFIX, sibling_path};
    use std::fs;

    fn sample_record(id: &str) -> BookingRecord {
        serde_json::from_value(serde_json::json!({
            "booking_id": id,
            "name": "Asha Rao",
            "phone": "9876543210",
            "date": "2026-11-20",
            "time": "19:30",
            "party_size": 4,
            "created_at": "2026-11-01T09:15:00.123Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_load_creates_empty_store() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = BookingRepository::new(&StorageConfig::in_dir(tmp.path().join("data")));

        let store = repo.load().unwrap();
        assert!(store.is_empty());

        let on_disk: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(repo.path()).unwrap()).unwrap();
        assert_eq!(on_disk, serde_json::json!({"bookings": []}));
    }

    #[test]
    fn test_legacy_array_is_upgraded() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = BookingRepository::new(&StorageConfig::in_dir(tmp.path()));
        fs::write(
            repo.path(),
            r#"[{"booking_id":"BKG4821","name":"Ravi","phone":"9876543210","date":"2025-11-20","time":"19:30","party_size":"3","special_request":"","created_at":"2025-11-01T09:15:00.000000Z"}]"#,
        )
        .unwrap();

        let store = repo.load().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.bookings[0].party_size, 3);

        repo.save(&store).unwrap();
        let on_disk: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(repo.path()).unwrap()).unwrap();
        assert!(on_disk["bookings"].is_array());
    }

    #[test]
    fn test_append_preserves_order() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = BookingRepository::new(&StorageConfig::in_dir(tmp.path()));

        let first = sample_record("BKG00000001");
        let second = sample_record("BKG00000002");
        repo.append(first.clone()).unwrap();
        repo.append(second.clone()).unwrap();

        let store = repo.load().unwrap();
        assert_eq!(store.bookings, vec![first, second]);
    }

    #[test]
    fn test_unreadable_record_does_not_reset_store() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = BookingRepository::new(&StorageConfig::in_dir(tmp.path()));
        let original = r#"{"bookings":[
            {"booking_id":"BKG4821","name":"Ravi","phone":"9876543210","date":"2025-11-20","time":"19:30","party_size":3,"created_at":"2025-11-01T09:15:00Z"},
            {"booking_id":"BKG1111","name":"Meera","phone":"9876500000","date":"2025-11-21","time":"20:00","party_size":"","created_at":"2025-11-01T09:20:00Z"}
        ]}"#;
        fs::write(repo.path(), original).unwrap();

        let store = repo.append(sample_record("BKG00000009")).unwrap();
        let ids: Vec<&str> = store.bookings.iter().map(|b| b.booking_id.as_str()).collect();
        assert_eq!(ids, vec!["BKG4821", "BKG00000009"]);

        let backup = sibling_path(repo.path(), BACKUP_SUFFIX);
        assert_eq!(fs::read_to_string(backup).unwrap(), original);
    }

    #[test]
    fn test_invalid_json_leaves_backup() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = BookingRepository::new(&StorageConfig::in_dir(tmp.path()));
        fs::write(repo.path(), "{\"bookings\": [").unwrap();

        let store = repo.load().unwrap();
        assert!(store.is_empty());
        assert!(sibling_path(repo.path(), BACKUP_SUFFIX).exists());
    }
}

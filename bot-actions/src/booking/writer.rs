//! 预订写入
//!
//! 加载 → 分配预订号 (与已有记录查重) → 追加 → 原子写回。
//! 写入失败时返回 `StorageWriteFailed`，调用方不得确认预订。

use chrono::{SubsecRound, Utc};
use shared::models::{BookingFields, BookingRecord, BookingStore};
use shared::util::booking_reference;
use shared::ErrorCode;

use crate::core::config::PARTY_SIZE_LIMIT;
use crate::storage::{BookingRepository, StorageConfig};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// 预订号冲突时的最大重试次数
const MAX_ID_ATTEMPTS: usize = 8;

#[derive(Debug, Clone)]
pub struct BookingWriter {
    repository: BookingRepository,
    generate_id: fn() -> String,
}

impl BookingWriter {
    pub fn new(storage: &StorageConfig) -> Self {
        Self {
            repository: BookingRepository::new(storage),
            generate_id: booking_reference,
        }
    }

    /// 替换预订号生成器 (测试用)
    pub fn with_id_generator(mut self, generate_id: fn() -> String) -> Self {
        self.generate_id = generate_id;
        self
    }

    pub fn repository(&self) -> &BookingRepository {
        &self.repository
    }

    /// 持久化一条已校验的预订，返回写入的记录
    pub fn save_booking(&self, fields: BookingFields) -> AppResult<BookingRecord> {
        validate_required_text(&fields.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&fields.special_request, "special_request", MAX_NOTE_LEN)?;
        if !(1..=PARTY_SIZE_LIMIT).contains(&fields.party_size) {
            return Err(AppError::with_message(
                ErrorCode::PartySizeOutOfRange,
                format!("party_size must be between 1 and {PARTY_SIZE_LIMIT}"),
            )
            .with_detail("party_size", fields.party_size));
        }

        let mut store = self.repository.load()?;
        let booking_id = self.allocate_id(&store)?;
        let record = BookingRecord::from_fields(booking_id, fields, Utc::now().trunc_subsecs(3));

        store.bookings.push(record.clone());
        self.repository.save(&store)?;

        tracing::info!(
            booking_id = %record.booking_id,
            date = %record.date,
            time = %record.time,
            party_size = record.party_size,
            total = store.len(),
            "Booking saved"
        );
        Ok(record)
    }

    fn allocate_id(&self, store: &BookingStore) -> AppResult<String> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = (self.generate_id)();
            if !store.contains_id(&id) {
                return Ok(id);
            }
            tracing::warn!(booking_id = %id, attempt, "Booking id collision, regenerating");
        }
        Err(AppError::with_message(
            ErrorCode::BookingIdCollision,
            format!("Could not allocate a unique booking id after {MAX_ID_ATTEMPTS} attempts"),
        ))
    }
}

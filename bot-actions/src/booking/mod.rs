//! 预订表单
//!
//! - [`trigger`] - 问候/命令短语识别，防止表单把 "hi"、"menu" 当作字段值
//! - [`validator`] - 逐字段校验与规范化
//! - [`writer`] - 分配预订号并追加写入

pub mod trigger;
pub mod validator;
pub mod writer;

pub use trigger::is_trigger_phrase;
pub use validator::{
    BookingSlot, BookingValidator, FieldRejection, RejectReason, SlotValue, normalize_phone,
};
pub use writer::BookingWriter;

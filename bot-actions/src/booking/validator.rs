//! Booking field validation
//!
//! One validator per form slot, no cross-field state. A rejection carries
//! the prompt that re-requests the same slot, so the dialogue engine can
//! loop on a field until it is satisfied.

use chrono::{Days, NaiveDate, NaiveTime};
use serde::Serialize;
use shared::error::ErrorCode;
use shared::models::{BOOKING_DATE_FORMAT, BOOKING_TIME_FORMAT};
use std::fmt;
use thiserror::Error;

use super::trigger::is_trigger_phrase;
use crate::core::Config;
use crate::core::config::PARTY_SIZE_LIMIT;
use crate::utils::time::BusinessHours;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, MIN_NAME_LEN};

/// Date format users are asked for
pub const INPUT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Time format users are asked for
pub const INPUT_TIME_FORMAT: &str = "%H:%M";

/// Canonical phone length (India, without country code)
pub const PHONE_DIGITS: usize = 10;

const INDIA_COUNTRY_CODE: &str = "91";

/// Booking form slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingSlot {
    Name,
    Phone,
    Date,
    Time,
    PartySize,
    SpecialRequest,
}

impl BookingSlot {
    /// Required slots, in the order the form asks for them
    pub const REQUIRED: [BookingSlot; 5] = [
        BookingSlot::Name,
        BookingSlot::Phone,
        BookingSlot::Date,
        BookingSlot::Time,
        BookingSlot::PartySize,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingSlot::Name => "name",
            BookingSlot::Phone => "phone",
            BookingSlot::Date => "date",
            BookingSlot::Time => "time",
            BookingSlot::PartySize => "party_size",
            BookingSlot::SpecialRequest => "special_request",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(BookingSlot::Name),
            "phone" => Some(BookingSlot::Phone),
            "date" => Some(BookingSlot::Date),
            "time" => Some(BookingSlot::Time),
            "party_size" => Some(BookingSlot::PartySize),
            "special_request" => Some(BookingSlot::SpecialRequest),
            _ => None,
        }
    }

    /// Wording used in "I still need ..." messages
    pub fn label(&self) -> &'static str {
        match self {
            BookingSlot::Name => "name",
            BookingSlot::Phone => "phone number",
            BookingSlot::Date => "date",
            BookingSlot::Time => "time",
            BookingSlot::PartySize => "number of people",
            BookingSlot::SpecialRequest => "special request",
        }
    }
}

impl fmt::Display for BookingSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Greeting or command instead of a value
    TriggerPhrase,
    Empty,
    TooShort,
    TooLong,
    InvalidFormat,
    InPast,
    BeyondHorizon,
    OutsideHours,
    OutOfRange,
}

/// A slot value that was not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{slot}: {prompt}")]
pub struct FieldRejection {
    pub slot: BookingSlot,
    pub reason: RejectReason,
    /// User-facing re-prompt
    pub prompt: String,
}

impl FieldRejection {
    fn new(slot: BookingSlot, reason: RejectReason, prompt: impl Into<String>) -> Self {
        Self {
            slot,
            reason,
            prompt: prompt.into(),
        }
    }

    /// Error code reported for this rejection
    pub fn code(&self) -> ErrorCode {
        match (self.reason, self.slot) {
            (RejectReason::Empty, _) => ErrorCode::RequiredField,
            (RejectReason::InPast | RejectReason::BeyondHorizon, _) => {
                ErrorCode::BookingDateOutOfRange
            }
            (RejectReason::OutsideHours, _) => ErrorCode::BookingOutsideHours,
            (RejectReason::OutOfRange, _) => ErrorCode::PartySizeOutOfRange,
            (RejectReason::InvalidFormat, BookingSlot::Phone) => ErrorCode::PhoneInvalid,
            (RejectReason::InvalidFormat, _) => ErrorCode::InvalidFormat,
            (RejectReason::TriggerPhrase | RejectReason::TooShort | RejectReason::TooLong, _) => {
                ErrorCode::ValidationFailed
            }
        }
    }
}

/// Normalized slot value, as written back into the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotValue {
    Text(String),
    Number(u32),
    Empty,
}

impl SlotValue {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SlotValue::Text(text) => serde_json::Value::String(text.clone()),
            SlotValue::Number(n) => serde_json::Value::from(*n),
            SlotValue::Empty => serde_json::Value::Null,
        }
    }
}

/// Digits-only phone, with a leading `91` (12 digits) or `0` (11 digits)
/// removed. `None` unless exactly 10 digits remain.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let local = match digits.len() {
        12 => digits.strip_prefix(INDIA_COUNTRY_CODE)?,
        11 => digits.strip_prefix('0')?,
        _ => digits.as_str(),
    };
    (local.len() == PHONE_DIGITS).then(|| local.to_string())
}

/// Field rules for the booking form
#[derive(Debug, Clone)]
pub struct BookingValidator {
    hours: BusinessHours,
    horizon_days: u64,
    max_party_size: u32,
}

impl BookingValidator {
    /// `max_party_size` is clamped into 1..=20
    pub fn new(hours: BusinessHours, horizon_days: u64, max_party_size: u32) -> Self {
        Self {
            hours,
            horizon_days,
            max_party_size: max_party_size.clamp(1, PARTY_SIZE_LIMIT),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.business_hours(),
            u64::try_from(config.booking_horizon_days).unwrap_or(0),
            config.max_party_size,
        )
    }

    pub fn hours(&self) -> BusinessHours {
        self.hours
    }

    /// Validate the value for `slot`. `intent` is the latest user intent.
    pub fn validate_slot(
        &self,
        slot: BookingSlot,
        value: &str,
        intent: Option<&str>,
        today: NaiveDate,
    ) -> Result<SlotValue, FieldRejection> {
        match slot {
            BookingSlot::Name => self.validate_name(value, intent).map(SlotValue::Text),
            BookingSlot::Phone => self.validate_phone(value, intent).map(SlotValue::Text),
            BookingSlot::Date => self
                .validate_date(value, intent, today)
                .map(|d| SlotValue::Text(d.format(BOOKING_DATE_FORMAT).to_string())),
            BookingSlot::Time => self
                .validate_time(value, intent)
                .map(|t| SlotValue::Text(t.format(BOOKING_TIME_FORMAT).to_string())),
            BookingSlot::PartySize => self
                .validate_party_size(value, intent)
                .map(SlotValue::Number),
            BookingSlot::SpecialRequest => Ok(self
                .validate_special_request(value)?
                .map_or(SlotValue::Empty, SlotValue::Text)),
        }
    }

    pub fn validate_name(&self, value: &str, intent: Option<&str>) -> Result<String, FieldRejection> {
        let slot = BookingSlot::Name;
        if is_trigger_phrase(value, intent) {
            return Err(FieldRejection::new(
                slot,
                RejectReason::TriggerPhrase,
                "That looks like a greeting or command rather than a name. What's the name for the booking?",
            ));
        }

        let name = value.split_whitespace().collect::<Vec<_>>().join(" ");
        let len = name.chars().count();
        if len < MIN_NAME_LEN {
            return Err(FieldRejection::new(
                slot,
                RejectReason::TooShort,
                format!("Please tell me the full name (at least {MIN_NAME_LEN} characters)."),
            ));
        }
        if len > MAX_NAME_LEN {
            return Err(FieldRejection::new(
                slot,
                RejectReason::TooLong,
                format!("That name is too long. Please keep it under {MAX_NAME_LEN} characters."),
            ));
        }
        Ok(name)
    }

    pub fn validate_phone(&self, value: &str, intent: Option<&str>) -> Result<String, FieldRejection> {
        let slot = BookingSlot::Phone;
        if is_trigger_phrase(value, intent) {
            return Err(FieldRejection::new(
                slot,
                RejectReason::TriggerPhrase,
                "That doesn't look like a phone number. Please provide a 10-digit phone number (e.g. 9876543210).",
            ));
        }
        normalize_phone(value).ok_or_else(|| {
            FieldRejection::new(
                slot,
                RejectReason::InvalidFormat,
                "Please provide a valid 10-digit phone number (e.g. 9876543210).",
            )
        })
    }

    pub fn validate_date(
        &self,
        value: &str,
        intent: Option<&str>,
        today: NaiveDate,
    ) -> Result<NaiveDate, FieldRejection> {
        let slot = BookingSlot::Date;
        let example = Self::example_date(today);

        if is_trigger_phrase(value, intent) {
            return Err(FieldRejection::new(
                slot,
                RejectReason::TriggerPhrase,
                format!(
                    "That doesn't look like a date. Please enter the booking date in DD/MM/YYYY format (example: {example})."
                ),
            ));
        }

        let date = NaiveDate::parse_from_str(value.trim(), INPUT_DATE_FORMAT).map_err(|_| {
            FieldRejection::new(
                slot,
                RejectReason::InvalidFormat,
                format!("Please enter the booking date in DD/MM/YYYY format (example: {example})."),
            )
        })?;

        self.check_date(date, today)
    }

    /// Bookable window check for an already parsed date
    pub fn check_date(&self, date: NaiveDate, today: NaiveDate) -> Result<NaiveDate, FieldRejection> {
        let slot = BookingSlot::Date;
        let example = Self::example_date(today);

        if date < today {
            return Err(FieldRejection::new(
                slot,
                RejectReason::InPast,
                format!(
                    "That date is in the past. Please provide a future date in DD/MM/YYYY format (example: {example})."
                ),
            ));
        }

        let last = today
            .checked_add_days(Days::new(self.horizon_days))
            .unwrap_or(NaiveDate::MAX);
        if date > last {
            return Err(FieldRejection::new(
                slot,
                RejectReason::BeyondHorizon,
                format!(
                    "We only take bookings up to {} days ahead. Please choose a date on or before {} (DD/MM/YYYY).",
                    self.horizon_days,
                    last.format(INPUT_DATE_FORMAT)
                ),
            ));
        }
        Ok(date)
    }

    pub fn validate_time(&self, value: &str, intent: Option<&str>) -> Result<NaiveTime, FieldRejection> {
        let slot = BookingSlot::Time;
        let example = self.example_time();

        if is_trigger_phrase(value, intent) {
            return Err(FieldRejection::new(
                slot,
                RejectReason::TriggerPhrase,
                format!(
                    "That doesn't look like a time. Please enter time in HH:MM (24-hour) format (example: {example})."
                ),
            ));
        }

        let time = NaiveTime::parse_from_str(value.trim(), INPUT_TIME_FORMAT).map_err(|_| {
            FieldRejection::new(
                slot,
                RejectReason::InvalidFormat,
                format!("Please enter time in HH:MM (24-hour) format (example: {example})."),
            )
        })?;

        if !self.hours.contains(time) {
            return Err(FieldRejection::new(
                slot,
                RejectReason::OutsideHours,
                format!(
                    "We're open from {}. Please choose a time within those hours in HH:MM (24-hour) format (example: {example}).",
                    self.hours.describe()
                ),
            ));
        }
        Ok(time)
    }

    pub fn validate_party_size(&self, value: &str, intent: Option<&str>) -> Result<u32, FieldRejection> {
        let slot = BookingSlot::PartySize;
        if is_trigger_phrase(value, intent) {
            return Err(FieldRejection::new(
                slot,
                RejectReason::TriggerPhrase,
                "Please enter a number, like 2 or 5.",
            ));
        }

        let value = value.trim();
        if value.is_empty() {
            return Err(FieldRejection::new(
                slot,
                RejectReason::Empty,
                "Please enter how many people will be coming (e.g. 5).",
            ));
        }
        if !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(FieldRejection::new(
                slot,
                RejectReason::InvalidFormat,
                "Please enter a valid number of people using digits (e.g. 5).",
            ));
        }

        let out_of_range = || {
            FieldRejection::new(
                slot,
                RejectReason::OutOfRange,
                format!(
                    "We allow booking for 1–{} people. Please enter a number between 1 and {}.",
                    self.max_party_size, self.max_party_size
                ),
            )
        };
        let size: u32 = value.parse().map_err(|_| out_of_range())?;
        if size < 1 || size > self.max_party_size {
            return Err(out_of_range());
        }
        Ok(size)
    }

    /// Free text, trimmed; blank means none
    pub fn validate_special_request(&self, value: &str) -> Result<Option<String>, FieldRejection> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        if value.chars().count() > MAX_NOTE_LEN {
            return Err(FieldRejection::new(
                BookingSlot::SpecialRequest,
                RejectReason::TooLong,
                format!("Please keep special requests under {MAX_NOTE_LEN} characters."),
            ));
        }
        Ok(Some(value.to_string()))
    }

    /// Tomorrow, as DD/MM/YYYY
    fn example_date(today: NaiveDate) -> String {
        today
            .checked_add_days(Days::new(1))
            .unwrap_or(today)
            .format(INPUT_DATE_FORMAT)
            .to_string()
    }

    /// 19:30 when it is bookable, otherwise the opening time
    fn example_time(&self) -> String {
        let evening = NaiveTime::from_hms_opt(19, 30, 0).unwrap_or(self.hours.open);
        let example = if self.hours.contains(evening) {
            evening
        } else {
            self.hours.open
        };
        example.format(INPUT_TIME_FORMAT).to_string()
    }
}

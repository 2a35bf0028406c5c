//! `action_save_booking`
//!
//! 1. 读取表单槽位并重新规范化 (不信任对话状态中的原始值)
//! 2. 缺失或无效 → 提示用户，`booking_confirmed = false`
//! 3. 写入预订；失败 → "technical issue"，`booking_confirmed = false`
//! 4. 发送确认短信；失败只提示，预订仍然确认

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use shared::models::{BOOKING_DATE_FORMAT, BookingFields, BookingRecord};

use super::{ActionContext, ActionHandler, ActionResponse, Tracker};
use crate::booking::{BookingSlot, BookingValidator, FieldRejection};
use crate::notify::NotifyOutcome;
use crate::utils::AppResult;

pub const BOOKING_CONFIRMED_SLOT: &str = "booking_confirmed";
pub const BOOKING_ID_SLOT: &str = "booking_id";

const SAVE_FAILED_MESSAGE: &str =
    "Sorry, we hit a technical issue saving your booking. Please try again.";

/// `action_save_booking`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveBookingAction;

/// Why the form values could not be turned into [`BookingFields`]
#[derive(Debug, Default)]
struct Incomplete {
    missing: Vec<BookingSlot>,
    invalid: Vec<FieldRejection>,
}

/// `name`, `name and phone number`, `name, date and time`
fn join_labels(slots: &[BookingSlot]) -> String {
    let labels: Vec<&str> = slots.iter().map(BookingSlot::label).collect();
    match labels.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} and {}", rest.join(", "), last),
        Some((last, _)) => last.to_string(),
        None => String::new(),
    }
}

/// Stored `YYYY-MM-DD` first, then the `DD/MM/YYYY` the user typed
fn collect_date(
    validator: &BookingValidator,
    raw: &str,
    today: NaiveDate,
) -> Result<NaiveDate, FieldRejection> {
    match NaiveDate::parse_from_str(raw.trim(), BOOKING_DATE_FORMAT) {
        Ok(date) => validator.check_date(date, today),
        Err(_) => validator.validate_date(raw, None, today),
    }
}

fn accept<T>(invalid: &mut Vec<FieldRejection>, result: Result<T, FieldRejection>) -> Option<T> {
    result.map_err(|rejection| invalid.push(rejection)).ok()
}

fn collect_fields(
    validator: &BookingValidator,
    tracker: &Tracker,
    today: NaiveDate,
) -> Result<BookingFields, Incomplete> {
    let mut incomplete = Incomplete::default();
    let mut required = |slot: BookingSlot| {
        let value = tracker.slot_text(slot.as_str());
        if value.is_none() {
            incomplete.missing.push(slot);
        }
        value
    };

    let name = required(BookingSlot::Name);
    let phone = required(BookingSlot::Phone);
    let date = required(BookingSlot::Date);
    let time = required(BookingSlot::Time);
    let party_size = required(BookingSlot::PartySize);
    let (Some(name), Some(phone), Some(date), Some(time), Some(party_size)) =
        (name, phone, date, time, party_size)
    else {
        return Err(incomplete);
    };

    let invalid = &mut incomplete.invalid;
    let name = accept(invalid, validator.validate_name(&name, None));
    let phone = accept(invalid, validator.validate_phone(&phone, None));
    let date = accept(invalid, collect_date(validator, &date, today));
    let time = accept(invalid, validator.validate_time(&time, None));
    let party_size = accept(invalid, validator.validate_party_size(&party_size, None));
    let special_request = tracker
        .slot_text(BookingSlot::SpecialRequest.as_str())
        .unwrap_or_default();
    let special_request = accept(invalid, validator.validate_special_request(&special_request));

    match (name, phone, date, time, party_size, special_request) {
        (Some(name), Some(phone), Some(date), Some(time), Some(party_size), Some(special_request)) => {
            Ok(BookingFields {
                name,
                phone,
                date,
                time,
                party_size,
                special_request,
            })
        }
        _ => Err(incomplete),
    }
}

fn confirmed_slots(response: &mut ActionResponse, record: &BookingRecord) {
    response
        .set_slot(BOOKING_CONFIRMED_SLOT, true)
        .set_slot(BOOKING_ID_SLOT, record.booking_id.as_str())
        .set_slot(BookingSlot::Name.as_str(), record.name.as_str())
        .set_slot(BookingSlot::Phone.as_str(), record.phone.as_str())
        .set_slot(BookingSlot::Date.as_str(), record.date.as_str())
        .set_slot(BookingSlot::Time.as_str(), record.time.as_str())
        .set_slot(BookingSlot::PartySize.as_str(), record.party_size)
        .set_slot(
            BookingSlot::SpecialRequest.as_str(),
            record
                .special_request
                .as_deref()
                .map_or(Value::Null, Value::from),
        );
}

#[async_trait]
impl ActionHandler for SaveBookingAction {
    async fn run(&self, ctx: &ActionContext<'_>) -> AppResult<ActionResponse> {
        let state = ctx.state;
        let mut response = ActionResponse::new();

        let fields = match collect_fields(&state.validator, ctx.tracker, state.today()) {
            Ok(fields) => fields,
            Err(incomplete) => {
                if !incomplete.missing.is_empty() {
                    tracing::info!(missing = ?incomplete.missing, "Booking form incomplete");
                    response.utter(format!(
                        "I still need your {} before I can save the booking.",
                        join_labels(&incomplete.missing)
                    ));
                }
                for rejection in &incomplete.invalid {
                    tracing::info!(
                        slot = %rejection.slot,
                        code = %rejection.code(),
                        reason = ?rejection.reason,
                        "Booking slot invalid"
                    );
                    response
                        .utter(rejection.prompt.as_str())
                        .set_slot(rejection.slot.as_str(), Value::Null);
                }
                response.set_slot(BOOKING_CONFIRMED_SLOT, false);
                return Ok(response);
            }
        };

        let record = match state.bookings.save_booking(fields) {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(code = %e.code, error = %e, "Failed to save booking");
                response
                    .utter(SAVE_FAILED_MESSAGE)
                    .set_slot(BOOKING_CONFIRMED_SLOT, false);
                return Ok(response);
            }
        };

        response.utter(format!(
            "Saved booking {} for {}.",
            record.booking_id, record.name
        ));

        let outcome = state.notifier.send_confirmation(&record).await;
        if let Some(code) = outcome.code() {
            tracing::warn!(booking_id = %record.booking_id, code = %code, "Booking saved without confirmation SMS");
        }
        match outcome {
            NotifyOutcome::Sent { .. } => {
                response.utter(format!("A confirmation SMS was sent to {}.", record.phone));
            }
            NotifyOutcome::Failed { error, .. } => {
                response.utter(format!("Booking saved, but failed to send SMS: {error}"));
            }
            NotifyOutcome::Skipped { reason } => {
                response.utter(format!("Booking saved. (SMS not sent — {reason}.)"));
            }
        }

        confirmed_slots(&mut response, &record);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_labels() {
        assert_eq!(join_labels(&[BookingSlot::Name]), "name");
        assert_eq!(
            join_labels(&[BookingSlot::Name, BookingSlot::Phone]),
            "name and phone number"
        );
        assert_eq!(
            join_labels(&[BookingSlot::Date, BookingSlot::Time, BookingSlot::PartySize]),
            "date, time and number of people"
        );
        assert_eq!(join_labels(&[]), "");
    }
}

//! `validate_booking_form`
//!
//! 只校验表单当前请求的槽位 (`requested_slot`)。
//! 本轮被顺带填入的其他预订槽位会被清空，由表单稍后单独询问。

use async_trait::async_trait;
use serde_json::Value;

use super::{ActionContext, ActionHandler, ActionResponse};
use crate::booking::BookingSlot;
use crate::utils::AppResult;

/// `validate_booking_form`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateBookingFormAction;

#[async_trait]
impl ActionHandler for ValidateBookingFormAction {
    async fn run(&self, ctx: &ActionContext<'_>) -> AppResult<ActionResponse> {
        let tracker = ctx.tracker;
        let state = ctx.state;
        let mut response = ActionResponse::new();

        let requested = tracker.requested_slot().and_then(BookingSlot::from_name);
        let intent = tracker.latest_intent();

        for name in tracker.slots_set_this_turn() {
            let Some(slot) = BookingSlot::from_name(name) else {
                continue;
            };
            if Some(slot) != requested {
                tracing::debug!(slot = %slot, requested = ?requested, "Clearing unrequested slot");
                response.set_slot(slot.as_str(), Value::Null);
            }
        }

        let Some(slot) = requested else {
            return Ok(response);
        };
        let Some(value) = tracker.slot_text(slot.as_str()) else {
            return Ok(response);
        };

        match state
            .validator
            .validate_slot(slot, &value, intent, state.today())
        {
            Ok(normalized) => {
                tracing::debug!(slot = %slot, "Slot accepted");
                response.set_slot(slot.as_str(), normalized.to_json());
            }
            Err(rejection) => {
                tracing::info!(
                    slot = %slot,
                    code = %rejection.code(),
                    reason = ?rejection.reason,
                    "Slot rejected"
                );
                response
                    .set_slot(slot.as_str(), Value::Null)
                    .utter(rejection.prompt);
            }
        }
        Ok(response)
    }
}

//! Caller-facing actions
//!
//! The dialogue engine invokes one action per user turn. Each action
//! implements [`ActionHandler`]; [`BotAction`] resolves a name to its
//! handler and [`dispatch`] runs it.

pub mod dish_details;
pub mod info;
pub mod response;
pub mod save_booking;
pub mod show_menu;
pub mod tracker;
pub mod validate_form;

pub use dish_details::DishDetailsAction;
pub use info::{AdditionalInfoAction, LocationAction};
pub use response::{ActionResponse, BotMessage, Event};
pub use save_booking::SaveBookingAction;
pub use show_menu::ShowMenuAction;
pub use tracker::{ActionRequest, Intent, LatestMessage, Tracker};
pub use validate_form::ValidateBookingFormAction;

use async_trait::async_trait;

use crate::core::ActionState;
use crate::utils::{AppError, AppResult};

/// What an action gets to work with
pub struct ActionContext<'a> {
    pub state: &'a ActionState,
    pub tracker: &'a Tracker,
}

/// Action handler trait
#[async_trait]
pub trait ActionHandler {
    async fn run(&self, ctx: &ActionContext<'_>) -> AppResult<ActionResponse>;
}

/// Registered actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotAction {
    ShowMenu(ShowMenuAction),
    DishDetails(DishDetailsAction),
    SaveBooking(SaveBookingAction),
    Location(LocationAction),
    AdditionalInfo(AdditionalInfoAction),
    ValidateBookingForm(ValidateBookingFormAction),
}

impl BotAction {
    pub const NAMES: [&'static str; 6] = [
        "action_show_menu",
        "action_dish_details",
        "action_save_booking",
        "action_location",
        "action_additional_info",
        "validate_booking_form",
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "action_show_menu" => Some(BotAction::ShowMenu(ShowMenuAction)),
            "action_dish_details" => Some(BotAction::DishDetails(DishDetailsAction)),
            "action_save_booking" => Some(BotAction::SaveBooking(SaveBookingAction)),
            "action_location" => Some(BotAction::Location(LocationAction)),
            "action_additional_info" => Some(BotAction::AdditionalInfo(AdditionalInfoAction)),
            "validate_booking_form" => {
                Some(BotAction::ValidateBookingForm(ValidateBookingFormAction))
            }
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BotAction::ShowMenu(_) => "action_show_menu",
            BotAction::DishDetails(_) => "action_dish_details",
            BotAction::SaveBooking(_) => "action_save_booking",
            BotAction::Location(_) => "action_location",
            BotAction::AdditionalInfo(_) => "action_additional_info",
            BotAction::ValidateBookingForm(_) => "validate_booking_form",
        }
    }
}

#[async_trait]
impl ActionHandler for BotAction {
    async fn run(&self, ctx: &ActionContext<'_>) -> AppResult<ActionResponse> {
        match self {
            BotAction::ShowMenu(action) => action.run(ctx).await,
            BotAction::DishDetails(action) => action.run(ctx).await,
            BotAction::SaveBooking(action) => action.run(ctx).await,
            BotAction::Location(action) => action.run(ctx).await,
            BotAction::AdditionalInfo(action) => action.run(ctx).await,
            BotAction::ValidateBookingForm(action) => action.run(ctx).await,
        }
    }
}

/// Resolve and run the requested action
pub async fn dispatch(state: &ActionState, request: &ActionRequest) -> AppResult<ActionResponse> {
    let action = BotAction::from_name(&request.next_action).ok_or_else(|| {
        tracing::warn!(action = %request.next_action, "Unknown action requested");
        AppError::action_not_found(&request.next_action)
    })?;

    tracing::debug!(
        action = action.name(),
        sender_id = request.sender_id.as_deref().unwrap_or("-"),
        "Running action"
    );

    let ctx = ActionContext {
        state,
        tracker: &request.tracker,
    };
    action.run(&ctx).await
}

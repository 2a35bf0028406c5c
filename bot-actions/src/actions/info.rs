//! Static restaurant information

use async_trait::async_trait;

use super::{ActionContext, ActionHandler, ActionResponse};
use crate::utils::AppResult;

const CANCELLATION_POLICY: &str = "No cancellation available.";
const PAYMENT_INFO: &str = "We accept cash and digital payments (UPI, cards).";
const PARKING_INFO: &str = "Limited parking available near the restaurant.";

/// `action_location`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocationAction;

#[async_trait]
impl ActionHandler for LocationAction {
    async fn run(&self, ctx: &ActionContext<'_>) -> AppResult<ActionResponse> {
        let restaurant = &ctx.state.config.restaurant;
        let mut response = ActionResponse::new();
        response.utter(format!(
            "Our address:\n{}\n\nOpen in Google Maps: {}\n\nFor directions or phone support call: {}",
            restaurant.address, restaurant.maps_link, restaurant.phone
        ));
        Ok(response)
    }
}

/// `action_additional_info`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdditionalInfoAction;

#[async_trait]
impl ActionHandler for AdditionalInfoAction {
    async fn run(&self, ctx: &ActionContext<'_>) -> AppResult<ActionResponse> {
        let hours = ctx.state.config.business_hours().describe_12h();
        let mut response = ActionResponse::new();
        response.utter(format!(
            "Working hours: Daily {hours}\n\n\
             Cancellation policy: {CANCELLATION_POLICY}\n\n\
             Payment: {PAYMENT_INFO}\n\n\
             Parking: {PARKING_INFO}\n\n\
             If you want any other details (menu, offers, large group policy), ask me."
        ));
        Ok(response)
    }
}

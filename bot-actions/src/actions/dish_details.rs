use async_trait::async_trait;

use super::{ActionContext, ActionHandler, ActionResponse};
use crate::menu::render_item_details;
use crate::utils::AppResult;

/// Slot filled by the "Details" card button
pub const DISH_NAME_SLOT: &str = "dish_name";

/// `action_dish_details`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DishDetailsAction;

#[async_trait]
impl ActionHandler for DishDetailsAction {
    async fn run(&self, ctx: &ActionContext<'_>) -> AppResult<ActionResponse> {
        let mut response = ActionResponse::new();

        let Some(dish) = ctx.tracker.slot_text(DISH_NAME_SLOT) else {
            response.utter("Which dish would you like to know about?");
            return Ok(response);
        };

        match ctx.state.menu.find_item_by_name(&dish) {
            Some(item) => {
                response.utter(render_item_details(&item));
            }
            None => {
                response.utter(format!(
                    "Sorry, I couldn't find '{}' on our menu.",
                    dish.trim()
                ));
            }
        }
        Ok(response)
    }
}

use async_trait::async_trait;

use super::{ActionContext, ActionHandler, ActionResponse};
use crate::menu::{MAX_MENU_CARDS, MENU_USAGE_HINT, MenuCards, build_menu_cards, render_menu_text};
use crate::utils::{AppError, AppResult};

/// `action_show_menu`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowMenuAction;

#[async_trait]
impl ActionHandler for ShowMenuAction {
    async fn run(&self, ctx: &ActionContext<'_>) -> AppResult<ActionResponse> {
        let mut response = ActionResponse::new();
        let menu = ctx.state.menu.load_menu_grouped();
        if menu.is_empty() {
            response.utter("Sorry, the menu is not available right now.");
            return Ok(response);
        }

        response.utter(render_menu_text(&menu));

        let cards = build_menu_cards(&menu, MAX_MENU_CARDS);
        if !cards.is_empty() {
            let custom = serde_json::to_value(MenuCards { cards })
                .map_err(|e| AppError::internal(format!("Failed to encode menu cards: {e}")))?;
            response.utter_custom(custom);
        }

        response.utter(MENU_USAGE_HINT);
        Ok(response)
    }
}

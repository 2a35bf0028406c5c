//! 菜单查询与展示
//!
//! - [`MenuService`] - 读取、展开、按名称查找
//! - [`render`] - 文本菜单、菜品卡片、单品详情

pub mod query;
pub mod render;

pub use query::{MenuService, find_in, flatten};
pub use render::{
    CardButton, MAX_MENU_CARDS, MENU_USAGE_HINT, MenuCard, MenuCards, build_menu_cards,
    category_title, render_item_details, render_menu_text,
};

//! 菜单展示
//!
//! 文本菜单按分类分块；卡片列表供支持富消息的前端使用。

use serde::{Deserialize, Serialize};
use shared::models::{MenuDocument, MenuItem};

/// 单次返回的最大卡片数
pub const MAX_MENU_CARDS: usize = 40;

/// 展示菜单后的使用提示
pub const MENU_USAGE_HINT: &str =
    "You can ask for details or ask the price of any dish, e.g., 'price of Roti Thali'.";

const UNNAMED: &str = "Unnamed";

/// `main_course` → `Main Course`
pub fn category_title(key: &str) -> String {
    let mut title = String::with_capacity(key.len());
    let mut in_word = false;
    for ch in key.replace('_', " ").chars() {
        if ch.is_alphabetic() {
            if in_word {
                title.extend(ch.to_lowercase());
            } else {
                title.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            title.push(ch);
            in_word = false;
        }
    }
    title
}

fn display_name(item: &MenuItem) -> &str {
    if item.name.trim().is_empty() {
        UNNAMED
    } else {
        &item.name
    }
}

fn item_line(item: &MenuItem) -> String {
    let mut line = match item.price_label() {
        Some(price) => format!(" - {} — {}", display_name(item), price),
        None => format!(" - {}", display_name(item)),
    };
    if let Some(description) = item.description_text() {
        line.push_str(&format!(" ({})", description));
    }
    line
}

/// 纯文本菜单，空菜单返回空字符串
pub fn render_menu_text(menu: &MenuDocument) -> String {
    let mut lines = Vec::new();
    for (category, items) in menu {
        lines.push(format!("{}:", category_title(category)));
        lines.extend(items.iter().map(item_line));
        lines.push(String::new());
    }
    lines.join("\n").trim().to_string()
}

/// 卡片按钮
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardButton {
    pub title: String,
    pub payload: String,
}

/// 菜品卡片
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCard {
    pub title: String,
    pub subtitle: String,
    /// `₹{price}`，无价格时为空
    pub text: String,
    pub category: String,
    pub buttons: Vec<CardButton>,
}

impl MenuCard {
    fn from_item(category: &str, item: &MenuItem) -> Self {
        let title = item.name.clone();
        let price = item.price_label();
        let dish = serde_json::json!({ "dish_name": title }).to_string();

        Self {
            subtitle: item.description.clone().unwrap_or_default(),
            text: price.clone().unwrap_or_default(),
            category: category.to_string(),
            buttons: vec![
                CardButton {
                    title: "Details".to_string(),
                    payload: format!("/ask_details{}", dish),
                },
                CardButton {
                    title: match price {
                        Some(price) => format!("Order — {}", price),
                        None => "Order".to_string(),
                    },
                    payload: format!("/order_item{}", dish),
                },
            ],
            title,
        }
    }
}

/// 自定义消息体 `{"type": "cards", "cards": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "cards")]
pub struct MenuCards {
    pub cards: Vec<MenuCard>,
}

/// 按文档顺序生成至多 `max` 张卡片
pub fn build_menu_cards(menu: &MenuDocument, max: usize) -> Vec<MenuCard> {
    menu.iter()
        .flat_map(|(category, items)| {
            items
                .iter()
                .map(move |item| MenuCard::from_item(category, item))
        })
        .take(max)
        .collect()
}

/// 单个菜品的详细说明
pub fn render_item_details(item: &MenuItem) -> String {
    let mut text = match item.price_label() {
        Some(price) => format!("{} — {}", display_name(item), price),
        None => display_name(item).to_string(),
    };
    if let Some(category) = item.category.as_deref() {
        text.push_str(&format!("\nCategory: {}", category_title(category)));
    }
    if let Some(description) = item.description_text() {
        text.push_str(&format!("\n{}", description));
    }
    text
}

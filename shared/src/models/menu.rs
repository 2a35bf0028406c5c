//! Menu Model

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Implicit category used when a legacy flat menu array is read
pub const LEGACY_MENU_CATEGORY: &str = "menu";

/// Menu item entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub name: String,
    /// Price in rupees, written as a JSON number
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        deserialize_with = "price_compat",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Source category (filled in when the menu is flattened)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl MenuItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: None,
            description: None,
            category: None,
        }
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Description, if present and not blank
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Price formatted for display, e.g. `₹120` or `₹99.5`
    pub fn price_label(&self) -> Option<String> {
        self.price.map(|p| format!("₹{}", p.normalize()))
    }
}

/// Hand-edited menus carry `150`, `"150"`, `""` or `null`.
/// Anything that is not a price reads as no price.
fn price_compat<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(#[serde(with = "rust_decimal::serde::float")] Decimal),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(price)) => Some(price),
        Some(Raw::Text(text)) => Decimal::from_str(text.trim()).ok(),
        Some(Raw::Other(_)) | None => None,
    })
}

/// Menu document: category name → items, in document order
pub type MenuDocument = IndexMap<String, Vec<MenuItem>>;

/// On-disk menu shapes
///
/// - `{"mains": [...], "drinks": [...]}` (current)
/// - `[...]` (legacy, read as a single implicit category)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MenuFile {
    Grouped(MenuDocument),
    Flat(Vec<MenuItem>),
}

impl MenuFile {
    pub fn into_grouped(self) -> MenuDocument {
        match self {
            MenuFile::Grouped(doc) => doc,
            MenuFile::Flat(items) => {
                let mut doc = MenuDocument::new();
                doc.insert(LEGACY_MENU_CATEGORY.to_string(), items);
                doc
            }
        }
    }
}

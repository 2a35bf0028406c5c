//! Menu lookup
//!
//! The menu is re-read on every call so operator edits show up without a
//! restart. Lookups never fail: a missing or broken menu is just empty.

use shared::models::{MenuDocument, MenuItem};

use crate::storage::{MenuRepository, StorageConfig};

/// Flatten a grouped menu in document order, tagging each item with its
/// category unless the item already names one.
pub fn flatten(menu: &MenuDocument) -> impl Iterator<Item = MenuItem> + '_ {
    menu.iter().flat_map(|(category, items)| {
        items.iter().map(move |item| {
            let mut item = item.clone();
            if item.category.is_none() {
                item.category = Some(category.clone());
            }
            item
        })
    })
}

/// Case-insensitive exact match on the trimmed name, then substring match.
/// First hit in order wins.
pub fn find_in<'a>(items: &'a [MenuItem], name: &str) -> Option<&'a MenuItem> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let normalized = |item: &MenuItem| item.name.trim().to_lowercase();
    items
        .iter()
        .find(|item| normalized(item) == needle)
        .or_else(|| items.iter().find(|item| normalized(item).contains(&needle)))
}

#[derive(Debug, Clone)]
pub struct MenuService {
    repository: MenuRepository,
}

impl MenuService {
    pub fn new(storage: &StorageConfig) -> Self {
        Self {
            repository: MenuRepository::new(storage),
        }
    }

    /// Category → items, empty when the menu file is absent or unreadable
    pub fn load_menu_grouped(&self) -> MenuDocument {
        self.repository.load_grouped()
    }

    pub fn load_menu_flat(&self) -> Vec<MenuItem> {
        flatten(&self.load_menu_grouped()).collect()
    }

    pub fn find_item_by_name(&self, name: &str) -> Option<MenuItem> {
        if name.trim().is_empty() {
            return None;
        }
        let items = self.load_menu_flat();
        let found = find_in(&items, name).cloned();
        tracing::debug!(query = %name, found = found.is_some(), "Menu lookup");
        found
    }
}

//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The backend is
//! the source of truth; this store mirrors the last fetched snapshot and is
//! patched optimistically after each completed request.

use std::collections::HashSet;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Collection, Item};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Current snapshot of all items
    pub items: Vec<Item>,
    /// Backend collection rows (without the "All"/"Default" sentinels)
    pub collections: Vec<Collection>,
    /// Item ids selected for bulk actions
    pub selected: HashSet<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Append a newly created item to the snapshot
pub fn store_add_item(store: &AppStore, item: Item) {
    store.items().write().push(item);
}

/// Replace an item in the snapshot by ID
pub fn store_update_item(store: &AppStore, updated: Item) {
    if let Some(item) = store
        .items()
        .write()
        .iter_mut()
        .find(|item| item.id == updated.id)
    {
        *item = updated;
    }
}

/// Remove an item from the snapshot (and the selection) by ID
pub fn store_remove_item(store: &AppStore, item_id: &str) {
    store.items().write().retain(|item| item.id != item_id);
    store.selected().write().remove(item_id);
}

/// Toggle an item's membership in the bulk-action selection
pub fn store_toggle_selected(store: &AppStore, item_id: &str) {
    // The subfield must outlive its write guard.
    let selected = store.selected();
    let mut selected = selected.write();
    if !selected.remove(item_id) {
        selected.insert(item_id.to_string());
    }
}

/// Clear the bulk-action selection (after every bulk action)
pub fn store_clear_selection(store: &AppStore) {
    store.selected().write().clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            title: format!("Book {id}"),
            description: None,
            picture_url: None,
            author: None,
            genres: Vec::new(),
            completed: false,
            updated_at: None,
            collection: None,
        }
    }

    #[test]
    fn toggle_selected_adds_then_removes() {
        let store = Store::new(AppState::default());
        store_toggle_selected(&store, "a");
        assert!(store.selected().read().contains("a"));
        store_toggle_selected(&store, "b");
        assert_eq!(store.selected().read().len(), 2);
        store_toggle_selected(&store, "a");
        assert!(!store.selected().read().contains("a"));
        assert!(store.selected().read().contains("b"));
    }

    #[test]
    fn selection_count_drives_bulk_bar_visibility() {
        let store = Store::new(AppState::default());
        assert_eq!(store.selected().read().len(), 0);
        store_toggle_selected(&store, "a");
        assert!(store.selected().read().len() > 0);
        store_clear_selection(&store);
        assert!(store.selected().read().is_empty());
    }

    #[test]
    fn removing_an_item_also_deselects_it() {
        let store = Store::new(AppState::default());
        store.items().write().push(item("a"));
        store.items().write().push(item("b"));
        store_toggle_selected(&store, "a");
        store_remove_item(&store, "a");
        assert!(store.items().read().iter().all(|i| i.id != "a"));
        assert!(store.selected().read().is_empty());
    }
}

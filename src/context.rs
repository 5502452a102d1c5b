//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::models::ALL_COLLECTION;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to re-fetch items and collections from the backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to re-fetch items and collections from the backend - write
    set_reload_trigger: WriteSignal<u32>,
    /// Active collection tab ("All" = no collection filter) - read
    pub current_collection: ReadSignal<String>,
    /// Active collection tab - write
    set_current_collection: WriteSignal<String>,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        current_collection: (ReadSignal<String>, WriteSignal<String>),
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            current_collection: current_collection.0,
            set_current_collection: current_collection.1,
        }
    }

    /// Trigger a background re-sync with the backend
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Switch the active collection tab
    pub fn select_collection(&self, name: String) {
        self.set_current_collection.set(name);
    }

    /// Reset the tab back to "All" (used after deleting the active tab)
    pub fn reset_collection(&self) {
        self.set_current_collection.set(ALL_COLLECTION.to_string());
    }
}

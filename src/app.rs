//! Shelf Frontend App
//!
//! Top-level component: owns the filter and sort signals, provides the store
//! and context, and re-syncs with the backend whenever the reload trigger
//! bumps.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::{BulkActionBar, CollectionTabs, FilterBar, ItemForm, ItemList};
use crate::context::AppContext;
use crate::filters::{filter_and_sort, ItemFilter, SortMode};
use crate::models::ALL_COLLECTION;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::default());
    provide_context(store);

    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (current_collection, set_current_collection) = signal(ALL_COLLECTION.to_string());
    provide_context(AppContext::new(
        (reload_trigger, set_reload_trigger),
        (current_collection, set_current_collection),
    ));

    let filter = RwSignal::new(ItemFilter::default());
    let sort_mode = RwSignal::new(SortMode::default());

    // The tab bar owns the collection choice; mirror it into the filter
    Effect::new(move |_| {
        let name = current_collection.get();
        filter.update(|f| f.collection = name);
    });

    // Best-effort re-sync on mount and on every reload bump. Failures are
    // logged and otherwise ignored; the last good snapshot stays on screen.
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        spawn_local(async move {
            match api::fetch_items().await {
                Ok(items) => {
                    web_sys::console::log_1(
                        &format!("[APP] Loaded {} items (trigger={})", items.len(), trigger)
                            .into(),
                    );
                    store.items().set(items);
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("fetchItems failed: {err}").into());
                }
            }
            match api::fetch_collections().await {
                Ok(collections) => store.collections().set(collections),
                Err(err) => {
                    web_sys::console::error_1(&format!("fetchCollections failed: {err}").into());
                }
            }
        });
    });

    // Filtered + sorted view over the current snapshot
    let visible_items = Memo::new(move |_| {
        let items = store.items().get();
        filter_and_sort(&items, &filter.get(), sort_mode.get())
    });

    view! {
        <div class="app-layout">
            <h1>"Shelf"</h1>

            <CollectionTabs />

            <ItemForm />

            <FilterBar filter=filter sort_mode=sort_mode />

            <BulkActionBar />

            <ItemList visible_items=visible_items />
        </div>
    }
}

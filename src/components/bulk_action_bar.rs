//! Bulk Action Bar Component
//!
//! Acts on the selection set: mark-read, move-to-collection, delete. Each
//! action fans out one request per selected id, waits for all of them to
//! settle, and reports a single failure without rolling back the requests
//! that succeeded. The selection is cleared after every action.

use futures_util::future::join_all;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ApiError, ItemPatch};
use crate::context::AppContext;
use crate::models::DEFAULT_COLLECTION;
use crate::store::{store_clear_selection, use_app_store, AppStateStoreFields};

/// Surface the first failure of a settled batch; successful members stay
/// applied server-side.
fn report_failures<T>(action: &str, results: &[Result<T, ApiError>]) {
    if let Some(err) = results.iter().find_map(|r| r.as_ref().err()) {
        web_sys::console::error_1(&format!("{action} failed: {err}").into());
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&format!(
                "Some books could not be processed ({action})."
            ));
        }
    }
}

#[component]
pub fn BulkActionBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let selected_count = Memo::new(move |_| store.selected().read().len());
    let (move_target, set_move_target) = signal(DEFAULT_COLLECTION.to_string());

    let selected_ids = move || -> Vec<String> {
        store.selected().read().iter().cloned().collect()
    };

    let mark_read = move |_| {
        let ids = selected_ids();
        spawn_local(async move {
            let results = join_all(ids.into_iter().map(|id| async move {
                api::update_item(&id, &ItemPatch::completed(true)).await
            }))
            .await;
            report_failures("mark as read", &results);
            store_clear_selection(&store);
            ctx.reload();
        });
    };

    let move_to_collection = move |_| {
        let ids = selected_ids();
        // Moving to "Default" clears the field instead of writing the sentinel
        let target = match move_target.get() {
            name if name == DEFAULT_COLLECTION => None,
            name => Some(name),
        };
        spawn_local(async move {
            let results = join_all(ids.into_iter().map(|id| {
                let patch = ItemPatch::collection(target.clone());
                async move { api::update_item(&id, &patch).await }
            }))
            .await;
            report_failures("move to collection", &results);
            store_clear_selection(&store);
            ctx.reload();
        });
    };

    let delete_selected = move |_| {
        let ids = selected_ids();
        let confirmed = web_sys::window()
            .map(|w| {
                w.confirm_with_message(&format!("Delete {} selected book(s)?", ids.len()))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            let results = join_all(
                ids.into_iter()
                    .map(|id| async move { api::delete_item(&id).await }),
            )
            .await;
            report_failures("delete", &results);
            store_clear_selection(&store);
            ctx.reload();
        });
    };

    view! {
        <Show when=move || { selected_count.get() > 0 }>
            <div class="bulk-action-bar">
                <span class="bulk-count">
                    {move || format!("{} selected", selected_count.get())}
                </span>

                <button class="bulk-read-btn" on:click=mark_read>"Mark as read"</button>

                <span class="bulk-move">
                    <select on:change=move |ev| set_move_target.set(event_target_value(&ev))>
                        <option
                            value=DEFAULT_COLLECTION
                            selected=move || move_target.get() == DEFAULT_COLLECTION
                        >
                            {DEFAULT_COLLECTION}
                        </option>
                        <For
                            each=move || store.collections().get()
                            key=|collection| collection.name.clone()
                            children=move |collection| {
                                let name = collection.name.clone();
                                let selected_name = collection.name.clone();
                                view! {
                                    <option
                                        value=name.clone()
                                        selected=move || move_target.get() == selected_name
                                    >
                                        {name.clone()}
                                    </option>
                                }
                            }
                        />
                    </select>
                    <button class="bulk-move-btn" on:click=move_to_collection>"Move"</button>
                </span>

                <button class="bulk-delete-btn" on:click=delete_selected>"Delete"</button>

                <button
                    class="bulk-clear-btn"
                    on:click=move |_| store_clear_selection(&store)
                >
                    "Clear selection"
                </button>
            </div>
        </Show>
    }
}

//! Item List Component
//!
//! The filtered, sorted list view: per-row read toggle, bulk-selection
//! checkbox, expandable detail panel, and inline delete.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ItemPatch};
use crate::components::DeleteConfirmButton;
use crate::models::Item;
use crate::store::{
    store_remove_item, store_toggle_selected, store_update_item, use_app_store,
    AppStateStoreFields,
};

#[component]
pub fn ItemList(visible_items: Memo<Vec<Item>>) -> impl IntoView {
    let store = use_app_store();

    // Which item's detail panel is open
    let (expanded_id, set_expanded_id) = signal::<Option<String>>(None);

    let toggle_completed = move |id: String, current: bool| {
        spawn_local(async move {
            match api::update_item(&id, &ItemPatch::completed(!current)).await {
                Ok(updated) => store_update_item(&store, updated),
                Err(err) => {
                    web_sys::console::error_1(&format!("toggleComplete failed: {err}").into());
                }
            }
        });
    };

    let remove_item = move |id: String| {
        spawn_local(async move {
            match api::delete_item(&id).await {
                Ok(()) => store_remove_item(&store, &id),
                Err(err) => {
                    web_sys::console::error_1(&format!("deleteItem failed: {err}").into());
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message("Could not delete the book.");
                    }
                }
            }
        });
    };

    view! {
        <div class="item-list">
            <h2>"Books (" {move || visible_items.get().len()} ")"</h2>

            <ul class="item-rows">
                <For
                    each=move || visible_items.get()
                    // Key on the mutable fields so edits re-render the row
                    key=|item| (item.id.clone(), item.completed, item.updated_at)
                    children=move |item| {
                        let id = item.id.clone();
                        let completed = item.completed;
                        let toggle_id = id.clone();
                        let select_id = id.clone();
                        let delete_id = id.clone();
                        let expand_id = id.clone();
                        let arrow_id = id.clone();
                        let show_id = id.clone();
                        let is_selected = move || store.selected().read().contains(id.as_str());
                        let detail = item.clone();

                        view! {
                            <li class="item-row" class:completed=completed>
                                <div
                                    class="item-row-header"
                                    on:click=move |_| {
                                        let next = if expanded_id.get().as_deref()
                                            == Some(expand_id.as_str())
                                        {
                                            None
                                        } else {
                                            Some(expand_id.clone())
                                        };
                                        set_expanded_id.set(next);
                                    }
                                >
                                    <input
                                        type="checkbox"
                                        class="select-box"
                                        prop:checked=is_selected
                                        on:click=move |ev| {
                                            ev.stop_propagation();
                                            store_toggle_selected(&store, &select_id);
                                        }
                                    />
                                    <input
                                        type="checkbox"
                                        class="read-box"
                                        prop:checked=completed
                                        on:click=move |ev| {
                                            ev.stop_propagation();
                                            toggle_completed(toggle_id.clone(), completed);
                                        }
                                    />
                                    <span class="item-title">{item.title.clone()}</span>
                                    {item.author.clone().map(|author| view! {
                                        <span class="item-author">{author}</span>
                                    })}
                                    <span class="item-collection">{item.collection_name().to_string()}</span>
                                    <span class="expand-arrow">
                                        {move || {
                                            if expanded_id.get().as_deref() == Some(arrow_id.as_str()) {
                                                "▼"
                                            } else {
                                                "▶"
                                            }
                                        }}
                                    </span>
                                    <DeleteConfirmButton
                                        button_class="delete-btn"
                                        on_confirm=Callback::new(move |_: ()| {
                                            remove_item(delete_id.clone())
                                        })
                                    />
                                </div>

                                <Show when=move || {
                                    expanded_id.get().as_deref() == Some(show_id.as_str())
                                }>
                                    <ItemDetail item=detail.clone() />
                                </Show>
                            </li>
                        }
                    }
                />
            </ul>

            <Show when=move || visible_items.get().is_empty()>
                <div class="empty-message">"No books match"</div>
            </Show>
        </div>
    }
}

/// Expanded detail panel: cover preview, synopsis, genres
#[component]
fn ItemDetail(item: Item) -> impl IntoView {
    view! {
        <div class="item-detail">
            {item.picture_url.clone().filter(|u| !u.is_empty()).map(|url| view! {
                <img class="item-cover" src=url alt=item.title.clone() />
            })}
            {item.description.clone().filter(|d| !d.is_empty()).map(|synopsis| view! {
                <p class="item-synopsis">{synopsis}</p>
            })}
            {(!item.genres.is_empty()).then(|| view! {
                <div class="genre-chips">
                    {item.genres.iter().map(|genre| view! {
                        <span class="genre-chip">{genre.clone()}</span>
                    }).collect_view()}
                </div>
            })}
        </div>
    }
}

//! Collection Tabs Component
//!
//! Tab bar for switching collections. "All" and "Default" are synthesized
//! client-side ahead of the backend rows; neither can be deleted.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::AppContext;
use crate::models::{ALL_COLLECTION, DEFAULT_COLLECTION};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn CollectionTabs() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (adding, set_adding) = signal(false);
    let (new_name, set_new_name) = signal(String::new());

    // Sentinels first, then backend rows (minus any shadowing the sentinels)
    let tabs = Memo::new(move |_| {
        let mut names = vec![ALL_COLLECTION.to_string(), DEFAULT_COLLECTION.to_string()];
        for collection in store.collections().read().iter() {
            if !names.contains(&collection.name) {
                names.push(collection.name.clone());
            }
        }
        names
    });

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let name = new_name.get().trim().to_string();
        if name.is_empty() {
            return;
        }

        spawn_local(async move {
            match api::create_collection(&name).await {
                Ok(()) => ctx.reload(),
                Err(err) => {
                    web_sys::console::error_1(&format!("createCollection failed: {err}").into());
                }
            }
        });

        set_new_name.set(String::new());
        set_adding.set(false);
    };

    let remove_collection = move |name: String| {
        let confirmed = web_sys::window()
            .map(|w| {
                w.confirm_with_message(&format!("Delete collection \"{name}\"?"))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        spawn_local(async move {
            match api::delete_collection(&name).await {
                Ok(()) => {
                    if ctx.current_collection.get_untracked() == name {
                        ctx.reset_collection();
                    }
                    ctx.reload();
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("deleteCollection failed: {err}").into());
                    if let Some(window) = web_sys::window() {
                        let _ = window.alert_with_message("Could not delete the collection.");
                    }
                }
            }
        });
    };

    view! {
        <div class="collection-tabs">
            <For
                each=move || tabs.get()
                key=|name| name.clone()
                children=move |name| {
                    let select_name = name.clone();
                    let delete_name = name.clone();
                    let active_name = name.clone();
                    let is_sentinel = name == ALL_COLLECTION || name == DEFAULT_COLLECTION;
                    let tab_class = move || {
                        if ctx.current_collection.get() == active_name {
                            "collection-tab active"
                        } else {
                            "collection-tab"
                        }
                    };

                    view! {
                        <span class="collection-tab-wrapper">
                            <button
                                class=tab_class
                                on:click=move |_| ctx.select_collection(select_name.clone())
                            >
                                {name.clone()}
                            </button>
                            <Show when=move || !is_sentinel>
                                {
                                    let delete_name = delete_name.clone();
                                    view! {
                                        <button
                                            class="collection-delete-btn"
                                            on:click=move |_| remove_collection(delete_name.clone())
                                        >
                                            "×"
                                        </button>
                                    }
                                }
                            </Show>
                        </span>
                    }
                }
            />

            {move || if adding.get() {
                view! {
                    <form class="collection-add-form" on:submit=on_add>
                        <input
                            type="text"
                            placeholder="Collection name"
                            prop:value=move || new_name.get()
                            on:input=move |ev| set_new_name.set(event_target_value(&ev))
                        />
                        <button type="submit">"+"</button>
                        <button type="button" on:click=move |_| set_adding.set(false)>"×"</button>
                    </form>
                }.into_any()
            } else {
                view! {
                    <button
                        class="collection-add-btn"
                        on:click=move |_| set_adding.set(true)
                    >
                        "+"
                    </button>
                }.into_any()
            }}
        </div>
    }
}

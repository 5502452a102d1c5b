//! Item Form Component
//!
//! Form for adding a book to the catalog, with optional Open Library prefill.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::api::{self, NewItem};
use crate::components::BookSearchModal;
use crate::context::AppContext;
use crate::models::{BookPrefill, ALL_COLLECTION, DEFAULT_COLLECTION};
use crate::store::{store_add_item, use_app_store};

fn none_if_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn split_genres(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

/// Form for creating new items in the active collection
#[component]
pub fn ItemForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (picture_url, set_picture_url) = signal(String::new());
    let (author, set_author) = signal(String::new());
    let (genres_input, set_genres_input) = signal(String::new());
    let (search_open, set_search_open) = signal(false);

    // Open Library prefill; non-empty fields win over whatever is typed,
    // empty ones leave the user's input alone.
    let apply_prefill = Callback::new(move |prefill: BookPrefill| {
        set_title.set(prefill.title);
        if let Some(value) = prefill.author.filter(|v| !v.is_empty()) {
            set_author.set(value);
        }
        if let Some(value) = prefill.picture_url.filter(|v| !v.is_empty()) {
            set_picture_url.set(value);
        }
        if let Some(value) = prefill.description.filter(|v| !v.is_empty()) {
            set_description.set(value);
        }
        if !prefill.genres.is_empty() {
            set_genres_input.set(prefill.genres.join(", "));
        }
        set_search_open.set(false);
    });

    let create_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if title.get().trim().is_empty() {
            web_sys::console::warn_1(&"addItem: empty title, skipping".into());
            return;
        }

        // New items land in the active tab; "All"/"Default" mean no collection.
        let collection = match ctx.current_collection.get() {
            name if name == ALL_COLLECTION || name == DEFAULT_COLLECTION => None,
            name => Some(name),
        };
        let genres = split_genres(&genres_input.get());
        let payload = NewItem {
            description: none_if_empty(description.get()),
            picture_url: none_if_empty(picture_url.get()),
            author: none_if_empty(author.get()),
            collection,
            genres: if genres.is_empty() { None } else { Some(genres) },
            ..NewItem::new(title.get().trim().to_string())
        };

        spawn_local(async move {
            match api::create_item(&payload).await {
                Ok(item) => {
                    store_add_item(&store, item);
                    set_title.set(String::new());
                    set_description.set(String::new());
                    set_picture_url.set(String::new());
                    set_author.set(String::new());
                    set_genres_input.set(String::new());
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("addItem failed: {err}").into());
                }
            }
        });
    };

    view! {
        <form class="item-form" on:submit=create_item>
            <div class="item-form-row">
                <input
                    type="text"
                    placeholder="Title *"
                    prop:value=move || title.get()
                    on:input=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        set_title.set(input.value());
                    }
                />
                <button
                    type="button"
                    class="openlibrary-btn"
                    on:click=move |_| set_search_open.set(true)
                >
                    "Find on Open Library"
                </button>
            </div>

            <textarea
                placeholder="Synopsis"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />

            <div class="item-form-row">
                <input
                    type="text"
                    placeholder="Author"
                    prop:value=move || author.get()
                    on:input=move |ev| set_author.set(event_target_value(&ev))
                />
                <input
                    type="text"
                    placeholder="Cover URL"
                    prop:value=move || picture_url.get()
                    on:input=move |ev| set_picture_url.set(event_target_value(&ev))
                />
            </div>

            <div class="item-form-row">
                <input
                    type="text"
                    placeholder="Genres (comma separated)"
                    prop:value=move || genres_input.get()
                    on:input=move |ev| set_genres_input.set(event_target_value(&ev))
                />
                <button type="submit">"Add"</button>
            </div>
        </form>

        <Show when=move || search_open.get()>
            <BookSearchModal
                on_pick=apply_prefill
                on_close=Callback::new(move |_: ()| set_search_open.set(false))
            />
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genres_input_splits_on_commas_and_trims() {
        assert_eq!(
            split_genres("sci-fi, fantasy ,, horror "),
            vec!["sci-fi", "fantasy", "horror"]
        );
        assert!(split_genres("  ").is_empty());
    }

    #[test]
    fn blank_fields_become_none() {
        assert_eq!(none_if_empty("  ".into()), None);
        assert_eq!(none_if_empty(" x ".into()), Some("x".into()));
    }
}

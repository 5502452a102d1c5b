//! Filter Bar Component
//!
//! Free-text search, facet dropdowns, and the sort selector. Facet options
//! (authors, genres) are derived from the current item snapshot.

use leptos::prelude::*;

use crate::filters::{unique_authors, unique_genres, ItemFilter, Presence, ReadFilter, SortMode};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn FilterBar(filter: RwSignal<ItemFilter>, sort_mode: RwSignal<SortMode>) -> impl IntoView {
    let store = use_app_store();

    let authors = Memo::new(move |_| unique_authors(&store.items().get()));
    let genres = Memo::new(move |_| unique_genres(&store.items().get()));

    view! {
        <div class="filter-bar">
            <input
                type="search"
                class="search-input"
                placeholder="Search by title, synopsis, or author..."
                prop:value=move || filter.get().query
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    filter.update(|f| f.query = value);
                }
            />

            <select
                class="author-filter"
                prop:value=move || filter.get().author
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    filter.update(|f| f.author = value);
                }
            >
                <option value="">"All authors"</option>
                <For
                    each=move || authors.get()
                    key=|author| author.clone()
                    children=move |author| {
                        view! { <option value=author.clone()>{author.clone()}</option> }
                    }
                />
            </select>

            <select
                class="genre-filter"
                prop:value=move || filter.get().genre
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    filter.update(|f| f.genre = value);
                }
            >
                <option value="">"All genres"</option>
                <For
                    each=move || genres.get()
                    key=|genre| genre.clone()
                    children=move |genre| {
                        view! { <option value=genre.clone()>{genre.clone()}</option> }
                    }
                />
            </select>

            <select
                class="read-filter"
                on:change=move |ev| {
                    let value = ReadFilter::from_key(&event_target_value(&ev));
                    filter.update(|f| f.read = value);
                }
            >
                <option value="any" selected=move || filter.get().read == ReadFilter::Any>
                    "Read or unread"
                </option>
                <option value="read" selected=move || filter.get().read == ReadFilter::Read>
                    "Read"
                </option>
                <option value="unread" selected=move || filter.get().read == ReadFilter::Unread>
                    "Unread"
                </option>
            </select>

            <select
                class="cover-filter"
                on:change=move |ev| {
                    let value = Presence::from_key(&event_target_value(&ev));
                    filter.update(|f| f.cover = value);
                }
            >
                <option value="any" selected=move || filter.get().cover == Presence::Any>
                    "With or without cover"
                </option>
                <option value="with" selected=move || filter.get().cover == Presence::With>
                    "Has cover"
                </option>
                <option value="without" selected=move || filter.get().cover == Presence::Without>
                    "No cover"
                </option>
            </select>

            <select
                class="synopsis-filter"
                on:change=move |ev| {
                    let value = Presence::from_key(&event_target_value(&ev));
                    filter.update(|f| f.synopsis = value);
                }
            >
                <option value="any" selected=move || filter.get().synopsis == Presence::Any>
                    "With or without synopsis"
                </option>
                <option value="with" selected=move || filter.get().synopsis == Presence::With>
                    "Has synopsis"
                </option>
                <option value="without" selected=move || filter.get().synopsis == Presence::Without>
                    "No synopsis"
                </option>
            </select>

            <select
                class="sort-select"
                on:change=move |ev| {
                    sort_mode.set(SortMode::from_key(&event_target_value(&ev)));
                }
            >
                {SortMode::ALL.iter().map(|mode| {
                    let mode = *mode;
                    view! {
                        <option value=mode.key() selected=move || sort_mode.get() == mode>
                            {mode.label()}
                        </option>
                    }
                }).collect_view()}
            </select>

            <Show when=move || filter.get().is_active()>
                <button
                    class="clear-filters-btn"
                    on:click=move |_| {
                        // Keep the collection tab, reset everything else
                        filter.update(|f| {
                            *f = ItemFilter {
                                collection: f.collection.clone(),
                                ..Default::default()
                            }
                        });
                    }
                >
                    "Clear filters"
                </button>
            </Show>
        </div>
    }
}

//! Book Search Modal Component
//!
//! Debounced search against Open Library. Picking a result fetches the full
//! work record (synopsis, subjects) and hands a prefill bundle to the form.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::models::BookPrefill;
use crate::openlibrary::{self, cover_url, CoverSize, SearchDoc};

/// How long a pause in typing triggers a search, in milliseconds.
const DEBOUNCE_MS: u32 = 300;

/// Subjects beyond this are noise for a genre field.
const MAX_PREFILL_GENRES: usize = 5;

const MAX_RESULTS: usize = 20;

#[component]
pub fn BookSearchModal(
    #[prop(into)] on_pick: Callback<BookPrefill>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let (query, set_query) = signal(String::new());
    let (results, set_results) = signal(Vec::<SearchDoc>::new());
    let (searching, set_searching) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);

    // Debounced search-as-you-type: each keystroke schedules a search that
    // only runs if the query is still current after the pause.
    Effect::new(move |_| {
        let typed = query.get().trim().to_string();
        if typed.is_empty() {
            set_results.set(Vec::new());
            set_error.set(None);
            return;
        }
        spawn_local(async move {
            TimeoutFuture::new(DEBOUNCE_MS).await;
            // Closing the modal disposes its signals while timers and
            // requests are still pending, so every access here has to
            // tolerate a dead signal.
            let current = match query.try_get_untracked() {
                Some(current) => current,
                None => return,
            };
            if current.trim() != typed {
                return;
            }
            set_searching.try_set(true);
            match openlibrary::search(&typed).await {
                Ok(docs) => {
                    set_results.try_set(docs.into_iter().take(MAX_RESULTS).collect());
                    set_error.try_set(None);
                }
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("openlibrary search failed: {err}").into(),
                    );
                    set_error.try_set(Some("Open Library search failed".to_string()));
                }
            }
            set_searching.try_set(false);
        });
    });

    let pick = move |doc: SearchDoc| {
        spawn_local(async move {
            let mut prefill = BookPrefill {
                title: doc.title.clone(),
                author: doc.primary_author().map(str::to_string),
                picture_url: doc.cover_i.map(|id| cover_url(id, CoverSize::Medium)),
                ..Default::default()
            };

            // Fill synopsis and genres from the work record; the doc alone is
            // still a usable prefill if this lookup fails.
            match openlibrary::fetch_work(doc.work_id()).await {
                Ok(work) => {
                    prefill.description = work.description;
                    prefill.genres = work
                        .subjects
                        .into_iter()
                        .take(MAX_PREFILL_GENRES)
                        .collect();
                    if prefill.picture_url.is_none() {
                        prefill.picture_url =
                            work.covers.first().map(|id| cover_url(*id, CoverSize::Medium));
                    }
                }
                Err(err) => {
                    web_sys::console::error_1(&format!("fetchWork failed: {err}").into());
                }
            }

            on_pick.run(prefill);
        });
    };

    view! {
        <div class="modal-backdrop" on:click=move |_| on_close.run(())>
            <div class="book-search-modal" on:click=move |ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h3>"Find on Open Library"</h3>
                    <button class="modal-close-btn" on:click=move |_| on_close.run(())>
                        "×"
                    </button>
                </div>

                <input
                    type="search"
                    class="book-search-input"
                    placeholder="Search by title or author..."
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />

                <Show when=move || searching.get()>
                    <div class="searching">"Searching..."</div>
                </Show>

                {move || error.get().map(|message| view! {
                    <div class="search-error">{message}</div>
                })}

                <ul class="search-results">
                    <For
                        each=move || results.get()
                        key=|doc| doc.key.clone()
                        children=move |doc| {
                            let row = doc.clone();
                            let author = doc.primary_author().unwrap_or("Unknown author").to_string();
                            let year = doc
                                .first_publish_year
                                .map(|y| y.to_string())
                                .unwrap_or_default();
                            let thumb = doc.cover_i.map(|id| cover_url(id, CoverSize::Small));

                            view! {
                                <li class="search-result" on:click=move |_| pick(row.clone())>
                                    {thumb.map(|url| view! {
                                        <img class="result-cover" src=url alt="" />
                                    })}
                                    <span class="result-title">{doc.title.clone()}</span>
                                    <span class="result-author">{author}</span>
                                    <span class="result-year">{year}</span>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use leptos::prelude::*;

    // The debounce task can outlive the modal; once the modal's signals are
    // disposed, the try_ accessors it uses must no-op rather than panic.
    #[test]
    fn late_debounce_task_accessors_noop_after_dispose() {
        let query = RwSignal::new(String::from("dune"));
        assert_eq!(query.try_get_untracked().as_deref(), Some("dune"));

        query.dispose();
        assert_eq!(query.try_get_untracked(), None);
        assert!(query.try_set(String::from("stale")).is_some());
    }
}

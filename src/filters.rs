//! Filtering and Sorting
//!
//! Pure predicates and comparators over the in-memory item list. The view
//! derives its visible list by running these over the store snapshot; nothing
//! here touches the network.

use crate::models::{Item, ALL_COLLECTION};

/// Sort order for the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Title,
    Author,
    RecentlyUpdated,
}

impl SortMode {
    pub const ALL: &'static [SortMode] =
        &[SortMode::Title, SortMode::Author, SortMode::RecentlyUpdated];

    pub fn key(self) -> &'static str {
        match self {
            SortMode::Title => "title",
            SortMode::Author => "author",
            SortMode::RecentlyUpdated => "updated",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Title => "Title A-Z",
            SortMode::Author => "Author A-Z",
            SortMode::RecentlyUpdated => "Recently updated",
        }
    }

    pub fn from_key(key: &str) -> SortMode {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.key() == key)
            .unwrap_or_default()
    }
}

/// Read/unread facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadFilter {
    #[default]
    Any,
    Read,
    Unread,
}

impl ReadFilter {
    pub fn from_key(key: &str) -> ReadFilter {
        match key {
            "read" => ReadFilter::Read,
            "unread" => ReadFilter::Unread,
            _ => ReadFilter::Any,
        }
    }
}

/// Tri-state facet for optional fields (cover, synopsis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    #[default]
    Any,
    With,
    Without,
}

impl Presence {
    pub fn from_key(key: &str) -> Presence {
        match key {
            "with" => Presence::With,
            "without" => Presence::Without,
            _ => Presence::Any,
        }
    }

    fn allows(self, present: bool) -> bool {
        match self {
            Presence::Any => true,
            Presence::With => present,
            Presence::Without => !present,
        }
    }
}

/// All active filters. Each field is an independent predicate; an item is
/// visible only if every one passes.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFilter {
    /// Collection tab; `"All"` passes everything.
    pub collection: String,
    /// Exact author match; empty = any.
    pub author: String,
    /// Genre membership; empty = any.
    pub genre: String,
    pub read: ReadFilter,
    pub cover: Presence,
    pub synopsis: Presence,
    /// Free-text substring match over title, description, and author.
    pub query: String,
}

impl Default for ItemFilter {
    fn default() -> Self {
        Self {
            collection: ALL_COLLECTION.to_string(),
            author: String::new(),
            genre: String::new(),
            read: ReadFilter::Any,
            cover: Presence::Any,
            synopsis: Presence::Any,
            query: String::new(),
        }
    }
}

impl ItemFilter {
    /// Whether any facet besides the collection tab is narrowing the list.
    /// The tab bar owns the collection choice, so "clear filters" leaves it.
    pub fn is_active(&self) -> bool {
        !self.author.is_empty()
            || !self.genre.is_empty()
            || self.read != ReadFilter::Any
            || self.cover != Presence::Any
            || self.synopsis != Presence::Any
            || !self.query.trim().is_empty()
    }

    pub fn matches(&self, item: &Item) -> bool {
        if self.collection != ALL_COLLECTION && item.collection_name() != self.collection {
            return false;
        }
        if !self.author.is_empty() && item.author.as_deref() != Some(self.author.as_str()) {
            return false;
        }
        if !self.genre.is_empty() && !item.genres.iter().any(|g| g == &self.genre) {
            return false;
        }
        let read_ok = match self.read {
            ReadFilter::Any => true,
            ReadFilter::Read => item.completed,
            ReadFilter::Unread => !item.completed,
        };
        if !read_ok {
            return false;
        }
        if !self.cover.allows(item.has_cover()) {
            return false;
        }
        if !self.synopsis.allows(item.has_synopsis()) {
            return false;
        }
        let query = self.query.trim();
        query.is_empty() || matches_query(item, query)
    }
}

/// Case-insensitive substring match over title, description, and author.
pub fn matches_query(item: &Item, query: &str) -> bool {
    let needle = query.to_lowercase();
    item.title.to_lowercase().contains(&needle)
        || item
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
        || item
            .author
            .as_deref()
            .is_some_and(|a| a.to_lowercase().contains(&needle))
}

pub fn sort_items(items: &mut [Item], mode: SortMode) {
    match mode {
        SortMode::Title => items.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        // Missing authors sort last.
        SortMode::Author => items.sort_by_key(|item| {
            (
                item.author.is_none(),
                item.author.as_deref().unwrap_or("").to_lowercase(),
            )
        }),
        // Descending; items never updated sort last.
        SortMode::RecentlyUpdated => items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
    }
}

/// Linear scan + single comparator pass over the current snapshot.
pub fn filter_and_sort(items: &[Item], filter: &ItemFilter, mode: SortMode) -> Vec<Item> {
    let mut visible: Vec<Item> = items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect();
    sort_items(&mut visible, mode);
    visible
}

/// Distinct authors for the filter dropdown, sorted.
pub fn unique_authors(items: &[Item]) -> Vec<String> {
    let mut authors: Vec<String> = items
        .iter()
        .filter_map(|item| item.author.clone())
        .filter(|a| !a.is_empty())
        .collect();
    authors.sort();
    authors.dedup();
    authors
}

/// Distinct genres for the filter dropdown, sorted.
pub fn unique_genres(items: &[Item]) -> Vec<String> {
    let mut genres: Vec<String> = items
        .iter()
        .flat_map(|item| item.genres.iter().cloned())
        .filter(|g| !g.is_empty())
        .collect();
    genres.sort();
    genres.dedup();
    genres
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_COLLECTION;

    fn item(id: &str, title: &str) -> Item {
        Item {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            picture_url: None,
            author: None,
            genres: Vec::new(),
            completed: false,
            updated_at: None,
            collection: None,
        }
    }

    fn library() -> Vec<Item> {
        vec![
            Item {
                author: Some("Frank Herbert".into()),
                description: Some("The desert planet Arrakis".into()),
                picture_url: Some("https://covers.example/dune.jpg".into()),
                genres: vec!["sci-fi".into()],
                updated_at: Some(300),
                collection: Some("Favourites".into()),
                ..item("1", "Dune")
            },
            Item {
                author: Some("Ursula K. Le Guin".into()),
                genres: vec!["sci-fi".into(), "anthropology".into()],
                completed: true,
                updated_at: Some(100),
                ..item("2", "The Dispossessed")
            },
            Item {
                author: Some("Frank Herbert".into()),
                updated_at: Some(200),
                ..item("3", "Dune Messiah")
            },
            item("4", "Unfiled notebook"),
        ]
    }

    #[test]
    fn free_text_matches_title_description_and_author() {
        let items = library();
        let hit = |q: &str| -> Vec<String> {
            items
                .iter()
                .filter(|i| matches_query(i, q))
                .map(|i| i.id.clone())
                .collect()
        };
        // Title, case-insensitive
        assert_eq!(hit("dune"), vec!["1", "3"]);
        // Description only
        assert_eq!(hit("ARRAKIS"), vec!["1"]);
        // Author only
        assert_eq!(hit("le guin"), vec!["2"]);
        // No field matches
        assert!(hit("tolkien").is_empty());
    }

    #[test]
    fn collection_all_passes_everything() {
        let items = library();
        let filter = ItemFilter::default();
        assert_eq!(filter_and_sort(&items, &filter, SortMode::Title).len(), 4);
    }

    #[test]
    fn collection_default_matches_absent_field() {
        let items = library();
        let filter = ItemFilter {
            collection: DEFAULT_COLLECTION.to_string(),
            ..Default::default()
        };
        let visible = filter_and_sort(&items, &filter, SortMode::Title);
        assert!(visible.iter().all(|i| i.collection.is_none()));
        assert_eq!(visible.len(), 3);
    }

    #[test]
    fn named_collection_matches_exactly() {
        let items = library();
        let filter = ItemFilter {
            collection: "Favourites".to_string(),
            ..Default::default()
        };
        let visible = filter_and_sort(&items, &filter, SortMode::Title);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "1");
    }

    #[test]
    fn facets_are_independent_predicates() {
        let items = library();
        let read = ItemFilter {
            read: ReadFilter::Read,
            ..Default::default()
        };
        assert_eq!(filter_and_sort(&items, &read, SortMode::Title)[0].id, "2");

        let unread = ItemFilter {
            read: ReadFilter::Unread,
            ..Default::default()
        };
        assert_eq!(filter_and_sort(&items, &unread, SortMode::Title).len(), 3);

        let with_cover = ItemFilter {
            cover: Presence::With,
            ..Default::default()
        };
        assert_eq!(filter_and_sort(&items, &with_cover, SortMode::Title)[0].id, "1");

        let no_synopsis = ItemFilter {
            synopsis: Presence::Without,
            ..Default::default()
        };
        assert_eq!(filter_and_sort(&items, &no_synopsis, SortMode::Title).len(), 3);

        let genre = ItemFilter {
            genre: "anthropology".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_and_sort(&items, &genre, SortMode::Title)[0].id, "2");
    }

    #[test]
    fn author_filter_is_exact_match() {
        let items = library();
        let filter = ItemFilter {
            author: "Frank Herbert".to_string(),
            ..Default::default()
        };
        let visible = filter_and_sort(&items, &filter, SortMode::Title);
        assert_eq!(visible.len(), 2);
        // "Frank" alone is not an author facet hit
        let partial = ItemFilter {
            author: "Frank".to_string(),
            ..Default::default()
        };
        assert!(filter_and_sort(&items, &partial, SortMode::Title).is_empty());
    }

    #[test]
    fn title_sort_is_case_insensitive_lexicographic() {
        let mut items = vec![item("1", "zebra"), item("2", "Apple"), item("3", "mango")];
        sort_items(&mut items, SortMode::Title);
        let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "mango", "zebra"]);
    }

    #[test]
    fn author_sort_puts_missing_authors_last() {
        let mut items = library();
        sort_items(&mut items, SortMode::Author);
        assert_eq!(items.last().unwrap().id, "4");
        assert_eq!(items[0].author.as_deref(), Some("Frank Herbert"));
    }

    #[test]
    fn recently_updated_sorts_descending_with_absent_last() {
        let mut items = library();
        sort_items(&mut items, SortMode::RecentlyUpdated);
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn clear_state_is_inactive() {
        assert!(!ItemFilter::default().is_active());
        let mut filter = ItemFilter::default();
        filter.collection = "Favourites".to_string();
        // The tab choice alone does not count as an active filter.
        assert!(!filter.is_active());
        filter.query = "dune".to_string();
        assert!(filter.is_active());
    }

    #[test]
    fn unique_facet_values_are_sorted_and_deduped() {
        let items = library();
        assert_eq!(
            unique_authors(&items),
            vec!["Frank Herbert", "Ursula K. Le Guin"]
        );
        assert_eq!(unique_genres(&items), vec!["anthropology", "sci-fi"]);
    }
}

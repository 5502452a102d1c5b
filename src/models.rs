//! Frontend Models
//!
//! Data structures matching the backend's wire formats.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Pseudo-collection meaning "no collection filter". Synthesized client-side,
/// never a backend row.
pub const ALL_COLLECTION: &str = "All";

/// Collection name for items whose `collection` field is absent.
pub const DEFAULT_COLLECTION: &str = "Default";

/// Catalog entry (matches backend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub picture_url: Option<String>,
    pub author: Option<String>,
    #[serde(default, deserialize_with = "genres_from_wire")]
    pub genres: Vec<String>,
    pub completed: bool,
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub collection: Option<String>,
}

impl Item {
    /// Collection this item belongs to, falling back to `"Default"`.
    pub fn collection_name(&self) -> &str {
        self.collection.as_deref().unwrap_or(DEFAULT_COLLECTION)
    }

    pub fn has_cover(&self) -> bool {
        self.picture_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    pub fn has_synopsis(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }
}

/// Named grouping of items.
///
/// `GET /collections` returns an array of `[name, created_at]` pairs, so this
/// deserializes from a tuple rather than a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, i64)")]
pub struct Collection {
    pub name: String,
    pub created_at: i64,
}

impl From<(String, i64)> for Collection {
    fn from((name, created_at): (String, i64)) -> Self {
        Self { name, created_at }
    }
}

/// Fields the Open Library modal hands to the create form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPrefill {
    pub title: String,
    pub author: Option<String>,
    pub picture_url: Option<String>,
    pub description: Option<String>,
    pub genres: Vec<String>,
}

/// The backend stores `genres` as a JSON-encoded string; older rows and other
/// clients may send a real array, `null`, or `""`. All of them normalize to a
/// plain list of strings, empty on anything unparseable.
fn genres_from_wire<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(parse_genres(value.unwrap_or(Value::Null)))
}

pub(crate) fn parse_genres(value: Value) -> Vec<String> {
    match value {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(raw) if !raw.is_empty() => serde_json::from_str(&raw).unwrap_or_default(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn genres_normalize_from_encoded_string() {
        let parsed = parse_genres(json!("[\"fantasy\",\"horror\"]"));
        assert_eq!(parsed, vec!["fantasy", "horror"]);
    }

    #[test]
    fn genres_normalize_from_array() {
        let parsed = parse_genres(json!(["sci-fi"]));
        assert_eq!(parsed, vec!["sci-fi"]);
    }

    #[test]
    fn genres_normalize_empty_inputs() {
        assert!(parse_genres(Value::Null).is_empty());
        assert!(parse_genres(json!("")).is_empty());
        assert!(parse_genres(json!("not json")).is_empty());
        assert!(parse_genres(json!(42)).is_empty());
    }

    #[test]
    fn item_deserializes_with_string_genres() {
        let item: Item = serde_json::from_value(json!({
            "id": "a1",
            "title": "Dune",
            "description": null,
            "picture_url": null,
            "author": "Frank Herbert",
            "genres": "[\"sci-fi\"]",
            "completed": false,
            "updated_at": 1700000000,
            "collection": null,
        }))
        .unwrap();
        assert_eq!(item.genres, vec!["sci-fi"]);
        assert_eq!(item.collection_name(), DEFAULT_COLLECTION);
    }

    #[test]
    fn item_deserializes_without_optional_fields() {
        let item: Item = serde_json::from_value(json!({
            "id": "a2",
            "title": "Untitled",
            "description": "",
            "picture_url": "",
            "author": null,
            "completed": true,
        }))
        .unwrap();
        assert!(item.genres.is_empty());
        assert!(!item.has_cover());
        assert!(!item.has_synopsis());
        assert_eq!(item.updated_at, None);
    }

    #[test]
    fn collection_decodes_from_pair() {
        let rows: Vec<Collection> =
            serde_json::from_value(json!([["Favourites", 1700000000], ["To Read", 1700000001]]))
                .unwrap();
        assert_eq!(rows[0].name, "Favourites");
        assert_eq!(rows[1].created_at, 1700000001);
    }
}

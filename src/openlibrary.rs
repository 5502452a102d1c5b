//! Open Library Client
//!
//! Read-only lookups against the public Open Library API, used to prefill
//! the create form. Consumed straight from the browser; the response shape
//! is assumed stable.

use reqwest::Client;
use serde::{Deserialize, Deserializer};

use crate::api::{ensure_ok, ApiError};

const BASE: &str = "https://openlibrary.org";
const COVERS_BASE: &str = "https://covers.openlibrary.org";

/// One work from `GET /search.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchDoc {
    /// Work key, e.g. `/works/OL45883W`.
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub author_name: Vec<String>,
    #[serde(default)]
    pub first_publish_year: Option<i64>,
    #[serde(default)]
    pub cover_i: Option<i64>,
}

impl SearchDoc {
    pub fn primary_author(&self) -> Option<&str> {
        self.author_name.first().map(String::as_str)
    }

    /// Work id with the `/works/` prefix stripped.
    pub fn work_id(&self) -> &str {
        self.key.strip_prefix("/works/").unwrap_or(&self.key)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

/// Full work record from `GET /works/{id}.json`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Work {
    pub title: String,
    #[serde(default, deserialize_with = "description_from_wire")]
    pub description: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub covers: Vec<i64>,
}

#[derive(Debug, Clone, Copy)]
pub enum CoverSize {
    Small,
    Medium,
    Large,
}

impl CoverSize {
    fn letter(self) -> char {
        match self {
            CoverSize::Small => 'S',
            CoverSize::Medium => 'M',
            CoverSize::Large => 'L',
        }
    }
}

pub fn cover_url(cover_id: i64, size: CoverSize) -> String {
    format!("{COVERS_BASE}/b/id/{cover_id}-{}.jpg", size.letter())
}

pub async fn search(query: &str) -> Result<Vec<SearchDoc>, ApiError> {
    let res = Client::new()
        .get(format!("{BASE}/search.json"))
        .query(&[("q", query)])
        .send()
        .await?;
    let body: SearchResponse = ensure_ok("searchBooks", res)?.json().await?;
    web_sys::console::debug_1(
        &format!("openlibrary search {:?}: {} docs", query, body.docs.len()).into(),
    );
    Ok(body.docs)
}

pub async fn fetch_work(work_id: &str) -> Result<Work, ApiError> {
    let res = Client::new()
        .get(format!("{BASE}/works/{work_id}.json"))
        .send()
        .await?;
    Ok(ensure_ok("fetchWork", res)?.json().await?)
}

/// `description` comes back as either a bare string or a
/// `{ "type": ..., "value": ... }` object depending on the record's age.
fn description_from_wire<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Typed { value: String },
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Typed { value } => value,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn work_description_accepts_bare_string() {
        let work: Work = serde_json::from_value(json!({
            "title": "Dune",
            "description": "Arrakis, the desert planet.",
        }))
        .unwrap();
        assert_eq!(work.description.as_deref(), Some("Arrakis, the desert planet."));
    }

    #[test]
    fn work_description_accepts_typed_object() {
        let work: Work = serde_json::from_value(json!({
            "title": "Dune",
            "description": { "type": "/type/text", "value": "Arrakis." },
            "subjects": ["Science fiction"],
            "covers": [11481354],
        }))
        .unwrap();
        assert_eq!(work.description.as_deref(), Some("Arrakis."));
        assert_eq!(work.subjects, vec!["Science fiction"]);
    }

    #[test]
    fn work_description_may_be_absent() {
        let work: Work = serde_json::from_value(json!({ "title": "Dune" })).unwrap();
        assert_eq!(work.description, None);
        assert!(work.subjects.is_empty());
    }

    #[test]
    fn search_doc_strips_work_prefix() {
        let doc: SearchDoc = serde_json::from_value(json!({
            "key": "/works/OL45883W",
            "title": "Dune",
            "author_name": ["Frank Herbert"],
            "first_publish_year": 1965,
            "cover_i": 11481354,
        }))
        .unwrap();
        assert_eq!(doc.work_id(), "OL45883W");
        assert_eq!(doc.primary_author(), Some("Frank Herbert"));
    }

    #[test]
    fn cover_urls_include_size_letter() {
        assert_eq!(
            cover_url(11481354, CoverSize::Medium),
            "https://covers.openlibrary.org/b/id/11481354-M.jpg"
        );
        assert_eq!(
            cover_url(1, CoverSize::Large),
            "https://covers.openlibrary.org/b/id/1-L.jpg"
        );
    }
}

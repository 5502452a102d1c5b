//! Backend API Client
//!
//! Thin fetch wrappers over the local REST backend. Each function builds one
//! request, checks the status, and returns parsed JSON. No retries, no
//! timeouts, no batching.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Response};
use serde::Serialize;
use thiserror::Error;

use crate::models::{Collection, Item};

const BASE: &str = "http://127.0.0.1:4321";

/// Matches `encodeURIComponent`: escape everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{context} failed: {status} {status_text}")]
    Status {
        context: &'static str,
        status: u16,
        status_text: String,
    },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Rejects non-2xx responses, logging before rethrowing.
pub(crate) fn ensure_ok(context: &'static str, res: Response) -> Result<Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let err = ApiError::Status {
        context,
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("").to_string(),
    };
    web_sys::console::error_1(&err.to_string().into());
    Err(err)
}

fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

// ========================
// Request Payloads
// ========================

/// Body for `POST /items`. Empty optionals go over the wire as `null`,
/// including an empty genre list.
#[derive(Debug, Clone, Serialize)]
pub struct NewItem {
    pub title: String,
    pub description: Option<String>,
    pub picture_url: Option<String>,
    pub author: Option<String>,
    pub collection: Option<String>,
    pub genres: Option<Vec<String>>,
}

impl NewItem {
    pub fn new(title: String) -> Self {
        Self {
            title,
            description: None,
            picture_url: None,
            author: None,
            collection: None,
            genres: None,
        }
    }
}

/// Body for `PUT /items/{id}`. Partial update: only fields explicitly set
/// appear in the JSON, so omitted fields are never overwritten server-side.
/// The double option distinguishes "leave alone" (outer `None`) from
/// "clear to null" (`Some(None)`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
}

impl ItemPatch {
    pub fn completed(value: bool) -> Self {
        Self {
            completed: Some(value),
            ..Default::default()
        }
    }

    /// Move to a collection; `None` clears the field back to `Default`.
    pub fn collection(name: Option<String>) -> Self {
        Self {
            collection: Some(name),
            ..Default::default()
        }
    }
}

#[derive(Serialize)]
struct NewCollection<'a> {
    name: &'a str,
}

// ========================
// Item Endpoints
// ========================

pub async fn fetch_items() -> Result<Vec<Item>, ApiError> {
    let res = Client::new().get(format!("{BASE}/items")).send().await?;
    let items: Vec<Item> = ensure_ok("fetchItems", res)?.json().await?;
    web_sys::console::debug_1(&format!("fetchItems: {} items", items.len()).into());
    Ok(items)
}

pub async fn create_item(payload: &NewItem) -> Result<Item, ApiError> {
    let res = Client::new()
        .post(format!("{BASE}/items"))
        .json(payload)
        .send()
        .await?;
    let item: Item = ensure_ok("createItem", res)?.json().await?;
    web_sys::console::debug_1(&format!("createItem: created {}", item.id).into());
    Ok(item)
}

pub async fn update_item(id: &str, patch: &ItemPatch) -> Result<Item, ApiError> {
    let res = Client::new()
        .put(format!("{BASE}/items/{id}"))
        .json(patch)
        .send()
        .await?;
    let item: Item = ensure_ok("updateItem", res)?.json().await?;
    web_sys::console::debug_1(&format!("updateItem: updated {}", item.id).into());
    Ok(item)
}

pub async fn delete_item(id: &str) -> Result<(), ApiError> {
    let res = Client::new()
        .delete(format!("{BASE}/items/{id}"))
        .send()
        .await?;
    ensure_ok("deleteItem", res)?;
    Ok(())
}

// ========================
// Collection Endpoints
// ========================

pub async fn fetch_collections() -> Result<Vec<Collection>, ApiError> {
    let res = Client::new()
        .get(format!("{BASE}/collections"))
        .send()
        .await?;
    let collections: Vec<Collection> = ensure_ok("fetchCollections", res)?.json().await?;
    Ok(collections)
}

pub async fn create_collection(name: &str) -> Result<(), ApiError> {
    let res = Client::new()
        .post(format!("{BASE}/collections"))
        .json(&NewCollection { name })
        .send()
        .await?;
    ensure_ok("createCollection", res)?;
    Ok(())
}

pub async fn delete_collection(name: &str) -> Result<(), ApiError> {
    let res = Client::new()
        .delete(format!("{BASE}/collections/{}", encode_segment(name)))
        .send()
        .await?;
    ensure_ok("deleteCollection", res)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn patch_serializes_only_set_fields() {
        let patch = ItemPatch::completed(true);
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({ "completed": true }));
    }

    #[test]
    fn patch_clears_field_with_explicit_null() {
        let patch = ItemPatch {
            description: Some(None),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({ "description": null }));
    }

    #[test]
    fn patch_sends_empty_genres_as_array() {
        let patch = ItemPatch {
            genres: Some(Vec::new()),
            ..Default::default()
        };
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({ "genres": [] }));
    }

    #[test]
    fn empty_patch_serializes_to_empty_object() {
        let value = serde_json::to_value(ItemPatch::default()).unwrap();
        assert_eq!(value, Value::Object(Default::default()));
    }

    #[test]
    fn new_item_sends_null_for_missing_optionals() {
        let value = serde_json::to_value(NewItem::new("Dune".into())).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Dune",
                "description": null,
                "picture_url": null,
                "author": null,
                "collection": null,
                "genres": null,
            })
        );
    }

    #[test]
    fn collection_names_encode_like_encode_uri_component() {
        assert_eq!(encode_segment("My Shelf"), "My%20Shelf");
        assert_eq!(encode_segment("a/b&c"), "a%2Fb%26c");
        assert_eq!(encode_segment("plain-name_1.!~*'()"), "plain-name_1.!~*'()");
    }
}

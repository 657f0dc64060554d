//! API directory entities as returned by the backend.
//!
//! The core only relies on the entry id (`_id`, or `id` when `_id` is
//! absent). Everything else the backend sends is kept verbatim in
//! [`ApiData::fields`] for the rendering layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Wire key holding the entry id.
const ID_KEY: &str = "_id";
/// Fallback id key, also emitted next to `_id` by some serializers.
const ID_ALIAS: &str = "id";

/// Opaque identifier of a directory entry.
///
/// No validation is applied: selection tolerates any id, including ones
/// that no longer belong to a rendered list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiId(String);

impl ApiId {
    /// Wrap a raw id.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApiId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ApiId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

/// An entry object without a string `_id` or `id`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("API entry has no string `_id` or `id`")]
pub struct MissingApiId;

/// A single API listed in the directory.
///
/// Ids must be unique within one result list for expansion to behave; the
/// core never deduplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ApiData {
    #[serde(rename = "_id")]
    id: ApiId,
    /// Descriptive fields owned by the backend (name, description, ...).
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for ApiData {
    type Error = MissingApiId;

    /// `_id` wins when it is a string. Otherwise `id` is used. An `id` that
    /// merely repeats the chosen id is dropped, any other leftover stays in
    /// `fields`.
    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = take_string(&mut fields, ID_KEY)
            .or_else(|| take_string(&mut fields, ID_ALIAS))
            .ok_or(MissingApiId)?;

        if fields.get(ID_ALIAS).and_then(Value::as_str) == Some(id.as_str()) {
            fields.remove(ID_ALIAS);
        }

        Ok(Self::new(id, fields))
    }
}

/// Remove `key` from `fields` if it holds a string.
fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !fields.get(key).is_some_and(Value::is_string) {
        return None;
    }
    match fields.remove(key) {
        Some(Value::String(raw)) => Some(raw),
        _ => None,
    }
}

impl ApiData {
    /// Entry with the given id and descriptive fields.
    pub fn new(id: impl Into<ApiId>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Shorthand for an entry with only a `name` field.
    pub fn named(id: impl Into<ApiId>, name: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.into()));
        Self::new(id, fields)
    }

    /// Entry id.
    pub fn id(&self) -> &ApiId {
        &self.id
    }

    /// Every field except the id, in wire order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// String-valued field lookup.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Display title: the `name` field, falling back to the id.
    pub fn title(&self) -> &str {
        self.text("name")
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.id.as_str())
    }

    /// The `description` field, if it is a string.
    pub fn description(&self) -> Option<&str> {
        self.text("description")
    }
}

/// Parse a backend list value into entries.
///
/// Returns `None` when the value is not an array or any element is not an
/// object with a string `_id` (or `id`). A partially valid list is treated
/// as malformed as a whole.
pub fn parse_api_list(value: &Value) -> Option<Vec<ApiData>> {
    let items = value.as_array()?;
    items
        .iter()
        .map(|item| serde_json::from_value::<ApiData>(item.clone()).ok())
        .collect()
}

//! Search backend seam.
//!
//! The controller only sees [`SearchBackend`]. Response bodies are parsed
//! leniently at this boundary: anything that is not a well-formed list of
//! entries is reported as such, never as an error.

pub mod http;

pub use http::HttpBackend;

use crate::model::{parse_api_list, ApiData, BackendError};
use serde_json::Value;
use std::future::Future;

/// The two backend operations the page depends on.
///
/// Implementations must be shareable across tasks: each request runs as its
/// own spawned task and reports back through the controller's channel.
pub trait SearchBackend: Send + Sync + 'static {
    /// `POST /user/search` with `{query}`.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<SearchResponse, BackendError>> + Send;

    /// `GET /user/trending`.
    fn trending(&self) -> impl Future<Output = Result<Vec<ApiData>, BackendError>> + Send;
}

/// What the `apis` key of a search response contained.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ApiList {
    /// No `apis` key (or the body was not an object).
    #[default]
    Missing,
    /// `apis` present but not a list of entries.
    Malformed,
    /// A well-formed list, possibly empty.
    Items(Vec<ApiData>),
}

/// A successful search response, `{message?, apis?}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResponse {
    /// Backend explanation; empty strings are normalized to `None`.
    pub message: Option<String>,
    /// Contents of the `apis` key.
    pub apis: ApiList,
}

impl SearchResponse {
    /// Response carrying a non-empty hit list.
    pub fn with_results(apis: Vec<ApiData>) -> Self {
        Self {
            message: None,
            apis: ApiList::Items(apis),
        }
    }

    /// Response with the given message and list.
    pub fn new(message: Option<String>, apis: ApiList) -> Self {
        Self {
            message: message.filter(|m| !m.is_empty()),
            apis,
        }
    }

    /// Interpret an arbitrary JSON body.
    pub fn from_value(body: &Value) -> Self {
        let apis = match body.get("apis") {
            None => ApiList::Missing,
            Some(value) => match parse_api_list(value) {
                Some(items) => ApiList::Items(items),
                None => ApiList::Malformed,
            },
        };
        Self::new(message_field(body), apis)
    }
}

/// `message` field of a JSON body, when it is a non-empty string.
pub fn message_field(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Interpret a trending body.
///
/// Anything other than a well-formed list becomes an empty list.
pub fn trending_from_value(body: &Value) -> Vec<ApiData> {
    if body.is_null() {
        return Vec::new();
    }
    parse_api_list(body).unwrap_or_else(|| {
        tracing::warn!("Trending response was not a list of APIs, treating as empty");
        Vec::new()
    })
}

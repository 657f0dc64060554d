//! HTTP implementation of the search backend.

use super::{message_field, trending_from_value, SearchBackend, SearchResponse};
use crate::model::{ApiData, BackendError};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Request body for `POST /user/search`.
#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
}

/// Backend talking to the directory's REST API.
///
/// Request timeouts are owned by the underlying client.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    bearer: Option<String>,
}

impl HttpBackend {
    /// Create a backend for `base_url` (e.g. `http://localhost:5000/api`).
    ///
    /// `bearer` is sent as `Authorization: Bearer <token>` on every request.
    /// Without a `timeout` requests may wait indefinitely.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
        bearer: Option<String>,
    ) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Falling back to default HTTP client");
                reqwest::Client::new()
            });

        Self {
            client,
            base_url: base_url.into(),
            bearer,
        }
    }

    /// Base URL requests are joined onto.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and split the body by status.
    ///
    /// Unparseable bodies become `Value::Null` so callers can apply their
    /// own leniency rules.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, BackendError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| BackendError::network(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::network(e.to_string()))?;
        let body = serde_json::from_slice::<Value>(&bytes).unwrap_or(Value::Null);

        if status.is_success() {
            Ok(body)
        } else {
            Err(BackendError::backend(status.as_u16(), message_field(&body)))
        }
    }
}

impl SearchBackend for HttpBackend {
    async fn search(&self, query: &str) -> Result<SearchResponse, BackendError> {
        let request = self
            .client
            .post(self.endpoint("user/search"))
            .json(&SearchRequest { query });
        let body = self.send(request).await?;
        tracing::debug!(response = %body, "Search response");
        Ok(SearchResponse::from_value(&body))
    }

    async fn trending(&self) -> Result<Vec<ApiData>, BackendError> {
        let request = self.client.get(self.endpoint("user/trending"));
        let body = self.send(request).await?;
        Ok(trending_from_value(&body))
    }
}

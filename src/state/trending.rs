//! Trending fallback list.
//!
//! Fetched once at initialization. Failures are logged and leave an empty
//! list; trending is secondary and never shows an error.

use crate::model::{ApiData, BackendError};

/// Loading flag plus the fetched list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrendingState {
    /// Set while the fetch is in flight.
    pub loading: bool,
    /// Fetched entries; empty before settling and after a failure.
    pub items: Vec<ApiData>,
}

/// Holds trending state and enforces the single fetch.
#[derive(Debug, Clone, Default)]
pub struct TrendingProvider {
    state: TrendingState,
    requested: bool,
    settled: bool,
}

impl TrendingProvider {
    /// Provider that has not fetched yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current trending state.
    pub fn state(&self) -> &TrendingState {
        &self.state
    }

    /// Mark the fetch as started.
    ///
    /// Returns `true` only on the first call; the caller issues the request
    /// only then.
    pub fn begin(&mut self) -> bool {
        if self.requested {
            return false;
        }
        self.requested = true;
        self.state.loading = true;
        true
    }

    /// Whether the fetch was issued and has not settled yet.
    pub fn is_pending(&self) -> bool {
        self.requested && !self.settled
    }

    /// Store the fetch outcome. Later settlements are ignored.
    pub fn settle(&mut self, outcome: Result<Vec<ApiData>, BackendError>) {
        if self.settled {
            tracing::warn!("Ignoring repeated trending settlement");
            return;
        }
        self.settled = true;
        self.state.loading = false;
        self.state.items = match outcome {
            Ok(items) => {
                tracing::info!(count = items.len(), "Trending APIs loaded");
                items
            }
            Err(err) => {
                tracing::warn!(error = %err, "Error fetching trending APIs");
                Vec::new()
            }
        };
    }
}

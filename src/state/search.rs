//! Search state machine.
//!
//! SearchState is a sum type: each status carries exactly the output that is
//! meaningful for it, so combinations like "error with results" cannot be
//! built.
//!
//! Lifecycle: `Idle` → (submit) `Loading` → (settle) one of `Success`,
//! `Empty`, `Error`. Every submit returns to `Loading`, even while earlier
//! requests are still unsettled.

use crate::backend::{ApiList, SearchResponse};
use crate::model::{ApiData, BackendError, SearchFailureKind};
use std::fmt;

/// Message shown when the backend gives no hits and no explanation.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No APIs found.";

/// Error shown when a failed search carries no backend message.
pub const DEFAULT_ERROR_MESSAGE: &str = "Search failed";

// ===== SearchState =====

/// Search state machine.
/// Sum type enforces exactly one state at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    /// No search submitted yet, or an error was dismissed.
    #[default]
    Idle,
    /// Request issued, awaiting a settlement.
    Loading {
        /// Submitted query.
        query: String,
    },
    /// Non-empty hit list.
    Success {
        /// Last submitted query.
        query: String,
        /// Hits in backend order.
        results: Vec<ApiData>,
    },
    /// No hits; `message` explains why.
    Empty {
        /// Last submitted query.
        query: String,
        /// Backend message, or [`DEFAULT_EMPTY_MESSAGE`].
        message: String,
        /// What the response looked like.
        reason: EmptyReason,
    },
    /// The request failed.
    Error {
        /// Last submitted query.
        query: String,
        /// Backend message, or [`DEFAULT_ERROR_MESSAGE`].
        error: String,
        /// Failure classification.
        kind: SearchFailureKind,
    },
}

/// Why a search ended without hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The backend returned an empty list.
    NoMatches,
    /// The response had no `apis` key.
    MissingList,
    /// `apis` was present but not a list of entries.
    MalformedResponse,
}

/// Status tag of a [`SearchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    /// [`SearchState::Idle`]
    Idle,
    /// [`SearchState::Loading`]
    Loading,
    /// [`SearchState::Success`]
    Success,
    /// [`SearchState::Empty`]
    Empty,
    /// [`SearchState::Error`]
    Error,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchStatus::Idle => "idle",
            SearchStatus::Loading => "loading",
            SearchStatus::Success => "success",
            SearchStatus::Empty => "empty",
            SearchStatus::Error => "error",
        };
        f.write_str(name)
    }
}

impl SearchState {
    /// Terminal state for a settled request.
    ///
    /// `query` is the last submitted query, which is not necessarily the one
    /// the settled request was issued for.
    pub fn settled(query: String, outcome: Result<SearchResponse, BackendError>) -> Self {
        match outcome {
            Ok(SearchResponse { message, apis }) => {
                let reason = match apis {
                    ApiList::Items(results) if !results.is_empty() => {
                        return SearchState::Success { query, results };
                    }
                    ApiList::Items(_) => EmptyReason::NoMatches,
                    ApiList::Missing => EmptyReason::MissingList,
                    ApiList::Malformed => EmptyReason::MalformedResponse,
                };
                SearchState::Empty {
                    query,
                    message: message.unwrap_or_else(|| DEFAULT_EMPTY_MESSAGE.to_string()),
                    reason,
                }
            }
            Err(err) => SearchState::Error {
                query,
                error: err
                    .message()
                    .unwrap_or(DEFAULT_ERROR_MESSAGE)
                    .to_string(),
                kind: err.kind(),
            },
        }
    }

    /// Status tag without the payload.
    pub fn status(&self) -> SearchStatus {
        match self {
            SearchState::Idle => SearchStatus::Idle,
            SearchState::Loading { .. } => SearchStatus::Loading,
            SearchState::Success { .. } => SearchStatus::Success,
            SearchState::Empty { .. } => SearchStatus::Empty,
            SearchState::Error { .. } => SearchStatus::Error,
        }
    }

    /// Last submitted query; empty before the first search.
    pub fn query(&self) -> &str {
        match self {
            SearchState::Idle => "",
            SearchState::Loading { query }
            | SearchState::Success { query, .. }
            | SearchState::Empty { query, .. }
            | SearchState::Error { query, .. } => query,
        }
    }

    /// Hits; empty outside `Success`.
    pub fn results(&self) -> &[ApiData] {
        match self {
            SearchState::Success { results, .. } => results,
            _ => &[],
        }
    }

    /// Explanation; only set in `Empty`.
    pub fn message(&self) -> Option<&str> {
        match self {
            SearchState::Empty { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Failure reason; only set in `Error`.
    pub fn error(&self) -> Option<&str> {
        match self {
            SearchState::Error { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Whether a request is awaited.
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading { .. })
    }

    /// Whether the state is one of `Success`, `Empty`, `Error`.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SearchState::Success { .. } | SearchState::Empty { .. } | SearchState::Error { .. }
        )
    }
}

// ===== Request ordering =====

/// How settlements of superseded requests are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// Every settlement overwrites state; the last to arrive wins.
    #[default]
    LastArrivalWins,
    /// Only the settlement of the most recently issued request is applied.
    LatestIssuedOnly,
}

/// Handle for one issued search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: String,
}

impl SearchTicket {
    /// Monotonically increasing per controller, starting at 1.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Query the request was issued for.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Result of feeding a settlement into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// State was replaced by the settlement's terminal state.
    Applied(SearchStatus),
    /// Settlement belonged to a superseded request and was dropped.
    DiscardedStale,
}

// ===== SearchController =====

/// Owns the lifecycle of the most recent search.
///
/// Pure: issuing the request is the caller's job. `submit` hands back the
/// ticket to issue, `settle` takes the ticket back with its outcome.
#[derive(Debug, Clone, Default)]
pub struct SearchController {
    state: SearchState,
    ordering: ResponseOrdering,
    last_query: String,
    last_issued: u64,
    in_flight: usize,
}

impl SearchController {
    /// Idle controller using `ordering` for superseded settlements.
    pub fn new(ordering: ResponseOrdering) -> Self {
        Self {
            ordering,
            ..Self::default()
        }
    }

    /// Current search state.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Configured ordering policy.
    pub fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }

    /// Number of issued requests that have not settled yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Query of the most recent submit, kept across settlements and
    /// error dismissal.
    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    /// Start a search. No validation: empty and whitespace queries are sent
    /// as-is.
    pub fn submit(&mut self, query: impl Into<String>) -> SearchTicket {
        let query = query.into();
        self.last_issued += 1;
        self.in_flight += 1;
        self.last_query = query.clone();
        self.state = SearchState::Loading {
            query: query.clone(),
        };
        tracing::debug!(seq = self.last_issued, query = %query, "Search submitted");

        SearchTicket {
            seq: self.last_issued,
            query,
        }
    }

    /// Apply the outcome of the request identified by `ticket`.
    pub fn settle(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<SearchResponse, BackendError>,
    ) -> SettleOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        let stale = ticket.seq != self.last_issued;
        if stale && self.ordering == ResponseOrdering::LatestIssuedOnly {
            tracing::warn!(
                seq = ticket.seq,
                latest = self.last_issued,
                query = %ticket.query,
                "Discarding settlement of superseded search"
            );
            return SettleOutcome::DiscardedStale;
        }

        if let Err(err) = &outcome {
            tracing::error!(query = %ticket.query, error = %err, "Search error");
        }

        self.state = SearchState::settled(self.last_query.clone(), outcome);

        let status = self.state.status();
        tracing::info!(
            seq = ticket.seq,
            stale,
            status = %status,
            results = self.state.results().len(),
            "Search settled"
        );
        SettleOutcome::Applied(status)
    }

    /// Close the error panel. No-op unless the state is `Error`.
    pub fn dismiss_error(&mut self) -> bool {
        if matches!(self.state, SearchState::Error { .. }) {
            self.state = SearchState::Idle;
            true
        } else {
            false
        }
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;

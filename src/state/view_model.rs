//! Composed page view-model.
//!
//! Combines identity, search, trending and selection into the single value
//! the rendering layer reads. The trending visibility rule lives here, not
//! in the trending provider.

use super::search::{ResponseOrdering, SearchController, SearchState, SearchTicket, SettleOutcome};
use super::selection::SelectionTracker;
use super::trending::{TrendingProvider, TrendingState};
use crate::backend::SearchResponse;
use crate::model::{ApiData, ApiId, BackendError, Identity};

/// Trending items shown on the page when no limit is configured.
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Page state. Mutated only through its methods, on a single thread.
#[derive(Debug, Clone)]
pub struct ViewModel {
    identity: Identity,
    search: SearchController,
    trending: TrendingProvider,
    selection: SelectionTracker,
    trending_limit: usize,
}

impl ViewModel {
    /// Page for `identity` with idle search, unfetched trending and nothing
    /// expanded.
    pub fn new(identity: Identity, ordering: ResponseOrdering, trending_limit: usize) -> Self {
        Self {
            identity,
            search: SearchController::new(ordering),
            trending: TrendingProvider::new(),
            selection: SelectionTracker::new(),
            trending_limit,
        }
    }

    /// Identity resolved at mount.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Current search state.
    pub fn search(&self) -> &SearchState {
        self.search.state()
    }

    /// The search controller, for ticket and in-flight bookkeeping.
    pub fn search_controller(&self) -> &SearchController {
        &self.search
    }

    /// Trending state, regardless of visibility.
    pub fn trending(&self) -> &TrendingState {
        self.trending.state()
    }

    /// Expanded card id.
    pub fn selection(&self) -> Option<&ApiId> {
        self.selection.expanded()
    }

    /// Maximum trending cards shown.
    pub fn trending_limit(&self) -> usize {
        self.trending_limit
    }

    // ===== Transitions =====

    /// See [`SearchController::submit`].
    pub fn submit(&mut self, query: impl Into<String>) -> SearchTicket {
        self.search.submit(query)
    }

    /// See [`SearchController::settle`].
    pub fn settle_search(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<SearchResponse, BackendError>,
    ) -> SettleOutcome {
        self.search.settle(ticket, outcome)
    }

    /// See [`TrendingProvider::begin`].
    pub fn begin_trending(&mut self) -> bool {
        self.trending.begin()
    }

    /// See [`TrendingProvider::settle`].
    pub fn settle_trending(&mut self, outcome: Result<Vec<ApiData>, BackendError>) {
        self.trending.settle(outcome);
    }

    /// See [`SelectionTracker::toggle`].
    pub fn toggle(&mut self, id: impl Into<ApiId>) {
        self.selection.toggle(id);
    }

    /// See [`SearchController::dismiss_error`].
    pub fn dismiss_error(&mut self) -> bool {
        self.search.dismiss_error()
    }

    /// Whether any issued request is still unsettled.
    pub fn has_pending(&self) -> bool {
        self.search.in_flight() > 0 || self.trending.is_pending()
    }

    // ===== Derived view =====

    /// Trending shows when the search is not loading and has produced
    /// neither hits nor an explanatory message.
    pub fn trending_visible(&self) -> bool {
        let search = self.search.state();
        !search.is_loading() && search.results().is_empty() && search.message().is_none()
    }

    /// Snapshot of which panels are visible and what they hold.
    pub fn page(&self) -> PageView<'_> {
        let search = self.search.state();

        let results = search
            .results()
            .iter()
            .enumerate()
            .map(|(position, api)| self.item(api, search.query(), position))
            .collect();

        let trending = self.trending_visible().then(|| {
            let state = self.trending.state();
            if state.loading {
                TrendingSection::Loading
            } else if state.items.is_empty() {
                TrendingSection::Unavailable
            } else {
                TrendingSection::Items(
                    state
                        .items
                        .iter()
                        .take(self.trending_limit)
                        .enumerate()
                        .map(|(position, api)| self.item(api, "", position))
                        .collect(),
                )
            }
        });

        PageView {
            display_name: self.identity.display_name(),
            loading: search.is_loading(),
            error: search.error(),
            empty_message: search.message(),
            results,
            trending,
        }
    }

    fn item<'a>(&'a self, api: &'a ApiData, highlight: &'a str, position: usize) -> ItemView<'a> {
        ItemView {
            api,
            expanded: self.selection.is_expanded(api.id()),
            highlight,
            position,
        }
    }
}

/// Visible panels of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    /// Greeting name ("Welcome back, <name>!").
    pub display_name: &'a str,
    /// Search spinner.
    pub loading: bool,
    /// Error panel text.
    pub error: Option<&'a str>,
    /// "No APIs Found" panel text.
    pub empty_message: Option<&'a str>,
    /// Search result cards, in backend order.
    pub results: Vec<ItemView<'a>>,
    /// Trending section, `None` when suppressed.
    pub trending: Option<TrendingSection<'a>>,
}

impl PageView<'_> {
    /// Result heading, e.g. "Found 3 APIs". `None` without results.
    pub fn results_heading(&self) -> Option<String> {
        match self.results.len() {
            0 => None,
            1 => Some("Found 1 API".to_string()),
            n => Some(format!("Found {n} APIs")),
        }
    }
}

/// Trending section contents.
#[derive(Debug, Clone, PartialEq)]
pub enum TrendingSection<'a> {
    /// Fetch in flight.
    Loading,
    /// Cards, capped at the trending limit.
    Items(Vec<ItemView<'a>>),
    /// Fetch settled with nothing to show.
    Unavailable,
}

/// One rendered card.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemView<'a> {
    /// The entry shown.
    pub api: &'a ApiData,
    /// Whether the card shows its details.
    pub expanded: bool,
    /// Text to highlight in the card; empty for trending cards.
    pub highlight: &'a str,
    /// Zero-based index within its list.
    pub position: usize,
}

#[cfg(test)]
#[path = "view_model_tests.rs"]
mod tests;

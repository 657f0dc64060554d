//! Page state machine (pure).
//!
//! All state transitions are plain method calls testable without a runtime;
//! issuing requests is left to [`crate::controller`].

pub mod search;
pub mod selection;
pub mod trending;
pub mod view_model;

// Re-export for convenience
pub use search::{
    EmptyReason, ResponseOrdering, SearchController, SearchState, SearchStatus, SearchTicket,
    SettleOutcome, DEFAULT_EMPTY_MESSAGE, DEFAULT_ERROR_MESSAGE,
};
pub use selection::SelectionTracker;
pub use trending::{TrendingProvider, TrendingState};
pub use view_model::{ItemView, PageView, TrendingSection, ViewModel, DEFAULT_TRENDING_LIMIT};

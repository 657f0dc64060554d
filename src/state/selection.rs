//! Expanded-item tracking.
//!
//! One slot shared by search results and trending items, so at most one
//! card is expanded on the whole page.

use crate::model::ApiId;

/// The single expanded card, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    expanded: Option<ApiId>,
}

impl SelectionTracker {
    /// Tracker with nothing expanded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapse `id` if it is expanded, otherwise expand it in place of
    /// whatever was expanded before.
    pub fn toggle(&mut self, id: impl Into<ApiId>) {
        let id = id.into();
        if self.expanded.as_ref() == Some(&id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id);
        }
    }

    /// Currently expanded id.
    pub fn expanded(&self) -> Option<&ApiId> {
        self.expanded.as_ref()
    }

    /// Whether `id` is the expanded card.
    pub fn is_expanded(&self, id: &ApiId) -> bool {
        self.expanded.as_ref() == Some(id)
    }
}

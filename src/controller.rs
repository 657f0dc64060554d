//! Request-issuing shell around the pure view-model.
//!
//! Each backend call runs as a spawned task that only sends its
//! [`Settlement`] back over a channel. State is mutated exclusively by
//! [`Controller::apply`], on whichever task owns the controller, so no locks
//! guard the view-model.
//!
//! Every spawned request reports exactly once, even if the backend panics:
//! the call runs in its own inner task and a failed join settles as a
//! network failure.
//!
//! Superseded searches are never cancelled. Whether their late settlements
//! overwrite state is decided by the configured [`ResponseOrdering`].

use crate::backend::{SearchBackend, SearchResponse};
use crate::config::ResolvedConfig;
use crate::identity::{CredentialStore, IdentityResolver, TokenDecoder};
use crate::model::{ApiData, ApiId, BackendError};
use crate::state::{
    ResponseOrdering, SearchTicket, SettleOutcome, ViewModel, DEFAULT_TRENDING_LIMIT,
};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Knobs the controller takes from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    /// How settlements of superseded searches are treated.
    pub ordering: ResponseOrdering,
    /// Trending items shown on the page.
    pub trending_limit: usize,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            ordering: ResponseOrdering::LastArrivalWins,
            trending_limit: DEFAULT_TRENDING_LIMIT,
        }
    }
}

impl From<&ResolvedConfig> for ControllerOptions {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            ordering: if config.discard_stale_responses {
                ResponseOrdering::LatestIssuedOnly
            } else {
                ResponseOrdering::LastArrivalWins
            },
            trending_limit: config.trending_limit,
        }
    }
}

/// A backend call that finished, successfully or not.
#[derive(Debug)]
pub enum Settlement {
    /// A search request finished.
    Search {
        /// Ticket the request was issued with.
        ticket: SearchTicket,
        /// Backend answer.
        outcome: Result<SearchResponse, BackendError>,
    },
    /// The trending request finished.
    Trending {
        /// Backend answer.
        outcome: Result<Vec<ApiData>, BackendError>,
    },
}

/// What applying a settlement did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// A search settlement was fed to the search controller.
    Search {
        /// Sequence number of the settled ticket.
        seq: u64,
        /// Whether it replaced the state or was discarded.
        outcome: SettleOutcome,
    },
    /// The trending list was stored.
    Trending,
}

/// Page controller: view-model plus the backend it issues requests to.
pub struct Controller<B: SearchBackend> {
    backend: Arc<B>,
    view: ViewModel,
    settlements_tx: mpsc::UnboundedSender<Settlement>,
    settlements_rx: mpsc::UnboundedReceiver<Settlement>,
}

impl<B: SearchBackend> Controller<B> {
    /// Mount the page: resolve identity, then start the one trending fetch.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime, like `tokio::spawn`.
    pub fn init<S, D>(
        backend: Arc<B>,
        resolver: &IdentityResolver<S, D>,
        options: ControllerOptions,
    ) -> Self
    where
        S: CredentialStore,
        D: TokenDecoder,
    {
        let identity = resolver.resolve();
        tracing::info!(
            name = identity.display_name(),
            ordering = ?options.ordering,
            "Controller initialized"
        );

        let (settlements_tx, settlements_rx) = mpsc::unbounded_channel();
        let mut controller = Self {
            backend,
            view: ViewModel::new(identity, options.ordering, options.trending_limit),
            settlements_tx,
            settlements_rx,
        };
        controller.fetch_trending();
        controller
    }

    /// Current page state.
    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    /// Issue the trending request unless it was issued before.
    fn fetch_trending(&mut self) {
        if !self.view.begin_trending() {
            return;
        }

        let backend = Arc::clone(&self.backend);
        let tx = self.settlements_tx.clone();
        tokio::spawn(async move {
            let outcome = supervised("trending", async move { backend.trending().await }).await;
            // Receiver gone means the controller was dropped; nothing to update.
            let _ = tx.send(Settlement::Trending { outcome });
        });
    }

    /// Start a search for `query`. Returns immediately; the state is
    /// `Loading` until the settlement is applied.
    pub fn submit(&mut self, query: impl Into<String>) -> SearchTicket {
        let ticket = self.view.submit(query);

        let backend = Arc::clone(&self.backend);
        let tx = self.settlements_tx.clone();
        let issued = ticket.clone();
        let query = ticket.query().to_string();
        tokio::spawn(async move {
            let outcome = supervised("search", async move { backend.search(&query).await }).await;
            let _ = tx.send(Settlement::Search {
                ticket: issued,
                outcome,
            });
        });

        ticket
    }

    /// See [`ViewModel::toggle`].
    pub fn toggle(&mut self, id: impl Into<ApiId>) {
        self.view.toggle(id);
    }

    /// See [`ViewModel::dismiss_error`].
    pub fn dismiss_error(&mut self) -> bool {
        self.view.dismiss_error()
    }

    /// Fold a settlement into the view-model.
    pub fn apply(&mut self, settlement: Settlement) -> Applied {
        match settlement {
            Settlement::Search { ticket, outcome } => {
                let seq = ticket.seq();
                let outcome = self.view.settle_search(ticket, outcome);
                Applied::Search { seq, outcome }
            }
            Settlement::Trending { outcome } => {
                self.view.settle_trending(outcome);
                Applied::Trending
            }
        }
    }

    /// Wait for the next settlement without applying it.
    ///
    /// Returns `None` at once when nothing is pending. Cancel safe.
    pub async fn next_settlement(&mut self) -> Option<Settlement> {
        if !self.view.has_pending() {
            return None;
        }
        self.settlements_rx.recv().await
    }

    /// Wait for the next settlement and apply it.
    pub async fn process_next(&mut self) -> Option<Applied> {
        let settlement = self.next_settlement().await?;
        Some(self.apply(settlement))
    }

    /// Apply every settlement that has already arrived, without waiting.
    pub fn process_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(settlement) = self.settlements_rx.try_recv() {
            self.apply(settlement);
            applied += 1;
        }
        applied
    }

    /// Wait until every issued request has settled.
    pub async fn settle_all(&mut self) {
        while self.process_next().await.is_some() {}
    }
}

/// Run a backend call in its own task so a panic still yields an outcome.
async fn supervised<F, T>(request: &'static str, call: F) -> Result<T, BackendError>
where
    F: Future<Output = Result<T, BackendError>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(call).await.unwrap_or_else(|err| {
        tracing::error!(request, error = %err, "Backend request task failed");
        Err(BackendError::network(format!("{request} request aborted")))
    })
}

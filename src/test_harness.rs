//! Scripted backend for controller acceptance tests.
//!
//! Responses are either canned per query (delivered as soon as the request
//! task runs) or held behind a gate the test releases explicitly, which is
//! how tests control the order settlements arrive in.

use crate::backend::{SearchBackend, SearchResponse};
use crate::identity::{IdentityResolver, JwtDecoder, StaticCredentialStore};
use crate::model::{ApiData, BackendError};
use crate::{Applied, Controller, ControllerOptions};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub type SearchOutcome = Result<SearchResponse, BackendError>;
pub type TrendingOutcome = Result<Vec<ApiData>, BackendError>;

/// In-memory backend with per-query scripts and release gates.
#[derive(Default)]
pub struct ScriptedBackend {
    canned: Mutex<HashMap<String, SearchOutcome>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<SearchOutcome>>>,
    trending: Mutex<Option<TrendingOutcome>>,
    trending_gate: Mutex<Option<oneshot::Receiver<TrendingOutcome>>>,
    panicking: Mutex<HashSet<String>>,
    searched: Mutex<Vec<String>>,
    trending_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` immediately with `outcome`.
    pub fn with_search(self, query: &str, outcome: SearchOutcome) -> Self {
        self.canned
            .lock()
            .unwrap()
            .insert(query.to_string(), outcome);
        self
    }

    /// Answer the trending request immediately with `outcome`.
    pub fn with_trending(self, outcome: TrendingOutcome) -> Self {
        *self.trending.lock().unwrap() = Some(outcome);
        self
    }

    /// Make every request for `query` panic inside the backend.
    pub fn panic_on_search(self, query: &str) -> Self {
        self.panicking.lock().unwrap().insert(query.to_string());
        self
    }

    /// Hold the next request for `query` until the returned sender fires.
    pub fn hold_search(&self, query: &str) -> oneshot::Sender<SearchOutcome> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(query.to_string(), rx);
        tx
    }

    /// Hold the trending request until the returned sender fires.
    pub fn hold_trending(&self) -> oneshot::Sender<TrendingOutcome> {
        let (tx, rx) = oneshot::channel();
        *self.trending_gate.lock().unwrap() = Some(rx);
        tx
    }

    /// Queries received so far, in request order.
    pub fn searched(&self) -> Vec<String> {
        self.searched.lock().unwrap().clone()
    }

    pub fn trending_calls(&self) -> usize {
        self.trending_calls.load(Ordering::SeqCst)
    }
}

impl SearchBackend for ScriptedBackend {
    async fn search(&self, query: &str) -> Result<SearchResponse, BackendError> {
        self.searched.lock().unwrap().push(query.to_string());

        let panics = self.panicking.lock().unwrap().contains(query);
        if panics {
            panic!("scripted backend panic for {query:?}");
        }

        let gate = self.gates.lock().unwrap().remove(query);
        if let Some(rx) = gate {
            return rx
                .await
                .unwrap_or_else(|_| Err(BackendError::network("gate dropped")));
        }

        let canned = self.canned.lock().unwrap().get(query).cloned();
        canned.unwrap_or_else(|| Ok(SearchResponse::default()))
    }

    async fn trending(&self) -> Result<Vec<ApiData>, BackendError> {
        self.trending_calls.fetch_add(1, Ordering::SeqCst);

        let gate = self.trending_gate.lock().unwrap().take();
        if let Some(rx) = gate {
            return rx
                .await
                .unwrap_or_else(|_| Err(BackendError::network("gate dropped")));
        }

        let canned = self.trending.lock().unwrap().clone();
        canned.unwrap_or_else(|| Ok(Vec::new()))
    }
}

// ===== Controller helpers =====

/// Resolver with no stored credential.
pub fn anonymous_resolver() -> IdentityResolver<StaticCredentialStore, JwtDecoder> {
    IdentityResolver::new(StaticCredentialStore::empty(), JwtDecoder::new())
}

/// Mount a controller over `backend` with an anonymous identity.
pub fn mount(
    backend: &Arc<ScriptedBackend>,
    options: ControllerOptions,
) -> Controller<ScriptedBackend> {
    Controller::init(Arc::clone(backend), &anonymous_resolver(), options)
}

/// Process settlements until the search with `seq` has been applied.
pub async fn settle_search(controller: &mut Controller<ScriptedBackend>, seq: u64) -> Applied {
    loop {
        match controller.process_next().await {
            Some(applied @ Applied::Search { seq: settled, .. }) if settled == seq => {
                return applied;
            }
            Some(_) => {}
            None => panic!("search {seq} never settled"),
        }
    }
}

/// Process settlements until the trending fetch has been applied.
pub async fn settle_trending(controller: &mut Controller<ScriptedBackend>) {
    loop {
        match controller.process_next().await {
            Some(Applied::Trending) => return,
            Some(_) => {}
            None => panic!("trending never settled"),
        }
    }
}

pub fn apis(prefix: &str, count: usize) -> Vec<ApiData> {
    (0..count)
        .map(|i| ApiData::named(format!("{prefix}-{i}"), format!("{prefix} {i}")))
        .collect()
}

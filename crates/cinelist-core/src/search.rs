use cinelist_models::Page;
use cinelist_sources::SourceError;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};
use crate::feed::{lock, LoadOutcome, ResetOnDrop};

pub type SearchFetcher<T> =
    Arc<dyn Fn(String, u32) -> BoxFuture<'static, Result<Page<T>, SourceError>> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot<T> {
    pub query: String,
    pub results: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> SearchSnapshot<T> {
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

struct SearchState<T> {
    query: String,
    results: Vec<T>,
    page: u32,
    total_pages: u32,
    total_results: u64,
    loading: bool,
    error: Option<String>,
    /// Bumped by every new query and reset; responses from older requests are dropped
    generation: u64,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            page: 1,
            total_pages: 0,
            total_results: 0,
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

impl<T> SearchState<T> {
    fn reset(&mut self) {
        *self = Self {
            generation: self.generation.wrapping_add(1),
            ..Self::default()
        };
    }
}

/// Free-text search with the same accumulate-by-page behaviour as a feed.
///
/// A blank query never reaches the network: it resets the results on the spot.
/// The latest query wins. Starting a new one while another is in flight
/// supersedes it, and the older response is discarded when it arrives.
pub struct SearchFeed<T> {
    name: String,
    fetcher: SearchFetcher<T>,
    state: Mutex<SearchState<T>>,
}

impl<T: Clone + Send + 'static> SearchFeed<T> {
    pub fn new(name: impl Into<String>, fetcher: SearchFetcher<T>) -> Self {
        Self {
            name: name.into(),
            fetcher,
            state: Mutex::new(SearchState::default()),
        }
    }

    pub fn from_fn<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(String, u32) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Page<T>, SourceError>> + Send + 'static,
    {
        Self::new(name, Arc::new(move |query, page| f(query, page).boxed()))
    }

    pub async fn search(&self, query: &str, page: u32) -> LoadOutcome {
        let generation = {
            let mut state = lock(&self.state);
            if query.trim().is_empty() {
                state.reset();
                return LoadOutcome::Loaded;
            }
            if state.loading {
                debug!("{}: superseding pending search for '{}'", self.name, state.query);
            }
            state.generation = state.generation.wrapping_add(1);
            state.loading = true;
            state.query = query.to_string();
            state.generation
        };
        self.run(query.to_string(), page, generation).await
    }

    /// Next page of the current query, only when one exists and nothing is pending
    pub async fn load_more(&self) -> LoadOutcome {
        let (query, page, generation) = {
            let mut state = lock(&self.state);
            if state.loading || state.page >= state.total_pages || state.query.trim().is_empty() {
                return LoadOutcome::Skipped;
            }
            state.loading = true;
            (state.query.clone(), state.page + 1, state.generation)
        };
        self.run(query, page, generation).await
    }

    /// Reset to the empty state; a request still in flight is discarded on arrival
    pub async fn clear(&self) {
        lock(&self.state).reset();
    }

    pub async fn has_more(&self) -> bool {
        let state = lock(&self.state);
        state.page < state.total_pages
    }

    pub async fn snapshot(&self) -> SearchSnapshot<T> {
        let state = lock(&self.state);
        SearchSnapshot {
            query: state.query.clone(),
            results: state.results.clone(),
            page: state.page,
            total_pages: state.total_pages,
            total_results: state.total_results,
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    async fn run(&self, query: String, page: u32, generation: u64) -> LoadOutcome {
        debug!("{}: '{}' page {}", self.name, query, page);
        let pending = ResetOnDrop::new(&self.state, move |state: &mut SearchState<T>| {
            if state.generation == generation {
                state.loading = false;
            }
        });
        let result = (self.fetcher)(query.clone(), page).await;
        pending.disarm();

        let mut state = lock(&self.state);
        if state.generation != generation {
            // A newer search or a reset owns the loading flag now
            debug!("{}: dropping stale response for '{}'", self.name, query);
            return LoadOutcome::Skipped;
        }
        state.loading = false;
        match result {
            Ok(response) => {
                if page <= 1 {
                    state.results = response.results;
                } else {
                    state.results.extend(response.results);
                }
                state.page = page;
                state.total_pages = response.total_pages;
                state.total_results = response.total_results;
                state.error = None;
                LoadOutcome::Loaded
            }
            Err(e) => {
                warn!("{}: '{}' page {} failed: {}", self.name, query, page, e);
                state.error = Some(e.to_string());
                if page <= 1 {
                    state.results.clear();
                    state.total_pages = 0;
                    state.total_results = 0;
                }
                LoadOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Semaphore;

    fn counting(calls: Arc<AtomicUsize>) -> SearchFeed<String> {
        SearchFeed::from_fn("search", move |query, page| {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                if query == "fail" {
                    return Err(SourceError::Api { status: 401, body: "Invalid API key".to_string() });
                }
                Ok(results_for(&query, page))
            }
        })
    }

    fn results_for(query: &str, page: u32) -> Page<String> {
        Page {
            page,
            results: (0..20).map(|i| format!("{} {}-{}", query, page, i)).collect(),
            total_pages: 2,
            total_results: 40,
        }
    }

    /// Queries listed in `gates` wait for a permit before answering
    fn gated(gates: HashMap<&'static str, Arc<Semaphore>>) -> SearchFeed<String> {
        SearchFeed::from_fn("search", move |query: String, page| {
            let gate = gates.get(query.as_str()).cloned();
            async move {
                if let Some(gate) = gate {
                    let _permit = gate.acquire().await.unwrap();
                }
                Ok(results_for(&query, page))
            }
        })
    }

    async fn wait_for_query(search: &SearchFeed<String>, query: &str) {
        loop {
            let snapshot = search.snapshot().await;
            if snapshot.loading && snapshot.query == query {
                break;
            }
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_blank_query_skips_network() {
        let calls = Arc::new(AtomicUsize::new(0));
        let search = counting(calls.clone());

        assert_eq!(search.search("", 1).await, LoadOutcome::Loaded);
        assert_eq!(search.search("   ", 1).await, LoadOutcome::Loaded);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let snapshot = search.snapshot().await;
        assert!(snapshot.results.is_empty());
        assert_eq!(snapshot.total_pages, 0);
        assert_eq!(snapshot.total_results, 0);
    }

    #[tokio::test]
    async fn test_blank_query_clears_previous_results() {
        let calls = Arc::new(AtomicUsize::new(0));
        let search = counting(calls.clone());

        search.search("matrix", 1).await;
        assert_eq!(search.snapshot().await.results.len(), 20);

        search.search("", 1).await;
        assert!(search.snapshot().await.results.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_more_until_exhausted() {
        let calls = Arc::new(AtomicUsize::new(0));
        let search = counting(calls.clone());

        search.search("dune", 1).await;
        assert!(search.has_more().await);
        assert_eq!(search.load_more().await, LoadOutcome::Loaded);

        let snapshot = search.snapshot().await;
        assert_eq!(snapshot.results.len(), 40);
        assert_eq!(snapshot.results[20], "dune 2-0");
        assert!(!snapshot.has_more());

        assert_eq!(search.load_more().await, LoadOutcome::Skipped);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_load_more_without_query_is_skipped() {
        let calls = Arc::new(AtomicUsize::new(0));
        let search = counting(calls.clone());
        assert_eq!(search.load_more().await, LoadOutcome::Skipped);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_first_page_failure_clears_results() {
        let calls = Arc::new(AtomicUsize::new(0));
        let search = counting(calls);

        search.search("alien", 1).await;
        assert_eq!(search.search("fail", 1).await, LoadOutcome::Failed);

        let snapshot = search.snapshot().await;
        assert!(snapshot.results.is_empty());
        assert!(snapshot.error.unwrap().contains("401"));
    }

    #[tokio::test]
    async fn test_clear_resets_everything() {
        let calls = Arc::new(AtomicUsize::new(0));
        let search = counting(calls);

        search.search("heat", 1).await;
        search.clear().await;

        let snapshot = search.snapshot().await;
        assert!(snapshot.query.is_empty());
        assert!(snapshot.results.is_empty());
        assert_eq!(snapshot.page, 1);
        assert!(snapshot.error.is_none());
    }

    #[tokio::test]
    async fn test_newer_query_supersedes_pending_one() {
        let gate = Arc::new(Semaphore::new(0));
        let search = Arc::new(gated(HashMap::from([("old", gate.clone())])));

        let older = tokio::spawn({
            let search = search.clone();
            async move { search.search("old", 1).await }
        });
        wait_for_query(&search, "old").await;

        assert_eq!(search.search("new", 1).await, LoadOutcome::Loaded);
        gate.add_permits(1);
        assert_eq!(older.await.unwrap(), LoadOutcome::Skipped);

        let snapshot = search.snapshot().await;
        assert_eq!(snapshot.query, "new");
        assert_eq!(snapshot.results[0], "new 1-0");
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_stale_response_keeps_newer_request_loading() {
        let old_gate = Arc::new(Semaphore::new(0));
        let new_gate = Arc::new(Semaphore::new(0));
        let search = Arc::new(gated(HashMap::from([
            ("old", old_gate.clone()),
            ("new", new_gate.clone()),
        ])));

        let older = tokio::spawn({
            let search = search.clone();
            async move { search.search("old", 1).await }
        });
        wait_for_query(&search, "old").await;
        let newer = tokio::spawn({
            let search = search.clone();
            async move { search.search("new", 1).await }
        });
        wait_for_query(&search, "new").await;

        old_gate.add_permits(1);
        assert_eq!(older.await.unwrap(), LoadOutcome::Skipped);
        let snapshot = search.snapshot().await;
        assert!(snapshot.loading);
        assert!(snapshot.results.is_empty());
        assert_eq!(search.load_more().await, LoadOutcome::Skipped);

        new_gate.add_permits(1);
        assert_eq!(newer.await.unwrap(), LoadOutcome::Loaded);
        let snapshot = search.snapshot().await;
        assert_eq!(snapshot.query, "new");
        assert_eq!(snapshot.results.len(), 20);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_response_after_clear_is_dropped() {
        let gate = Arc::new(Semaphore::new(0));
        let search = Arc::new(gated(HashMap::from([("heat", gate.clone())])));

        let pending = tokio::spawn({
            let search = search.clone();
            async move { search.search("heat", 1).await }
        });
        wait_for_query(&search, "heat").await;

        search.clear().await;
        assert!(!search.snapshot().await.loading);

        gate.add_permits(1);
        assert_eq!(pending.await.unwrap(), LoadOutcome::Skipped);

        let snapshot = search.snapshot().await;
        assert!(snapshot.query.is_empty());
        assert!(snapshot.results.is_empty());
        assert_eq!(snapshot.total_pages, 0);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_cancelled_load_more_releases_loading() {
        let gate = Arc::new(Semaphore::new(0));
        let search = SearchFeed::from_fn("search", {
            let gate = gate.clone();
            move |query: String, page| {
                let gate = gate.clone();
                async move {
                    if page >= 2 {
                        let _permit = gate.acquire().await.unwrap();
                    }
                    Ok(results_for(&query, page))
                }
            }
        });

        search.search("dune", 1).await;
        let abandoned = tokio::time::timeout(Duration::from_millis(20), search.load_more()).await;
        assert!(abandoned.is_err());
        assert!(!search.snapshot().await.loading);

        gate.add_permits(1);
        assert_eq!(search.load_more().await, LoadOutcome::Loaded);
        let snapshot = search.snapshot().await;
        assert_eq!(snapshot.results.len(), 40);
        assert_eq!(snapshot.page, 2);
    }
}

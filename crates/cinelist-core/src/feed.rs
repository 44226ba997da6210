//! Paginated catalog feeds.
//!
//! A [`Feed`] accumulates pages of one catalog category: page 1 replaces the
//! list, later pages append. A fetch that arrives while another is in flight is
//! skipped without touching the network. The loading flag is checked and set
//! under the same lock, and the lock is never held across the request itself.
//! If the caller drops a fetch before it settles, the flag is released again
//! so the feed does not stay stuck in the loading state.

use cinelist_models::{Page, TimeWindow};
use cinelist_sources::SourceError;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

pub type PageFetcher<T> = Arc<dyn Fn(u32) -> BoxFuture<'static, Result<Page<T>, SourceError>> + Send + Sync>;

pub type WindowFetcher<T> =
    Arc<dyn Fn(TimeWindow) -> BoxFuture<'static, Result<Page<T>, SourceError>> + Send + Sync>;

/// What a fetch request ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// Nothing was applied: another fetch was still pending, or a newer
    /// request superseded this one before its response arrived
    Skipped,
    /// The request failed; the message is kept in the feed's error slot
    Failed,
}

/// Owned copy of a feed's state for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> FeedSnapshot<T> {
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

struct FeedState<T> {
    items: Vec<T>,
    page: u32,
    total_pages: u32,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for FeedState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            total_pages: 0,
            loading: false,
            error: None,
        }
    }
}

impl<T: Clone> FeedState<T> {
    fn snapshot(&self) -> FeedSnapshot<T> {
        FeedSnapshot {
            items: self.items.clone(),
            page: self.page,
            total_pages: self.total_pages,
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

/// State locks are only held for short synchronous sections, never across a
/// request, so a poisoned lock still holds consistent data
pub(crate) fn lock<S>(state: &Mutex<S>) -> MutexGuard<'_, S> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs `reset` against the state if dropped while still armed, which only
/// happens when the future awaiting a request is cancelled
pub(crate) struct ResetOnDrop<'a, S, F: FnOnce(&mut S)> {
    state: &'a Mutex<S>,
    reset: Option<F>,
}

impl<'a, S, F: FnOnce(&mut S)> ResetOnDrop<'a, S, F> {
    pub(crate) fn new(state: &'a Mutex<S>, reset: F) -> Self {
        Self { state, reset: Some(reset) }
    }

    pub(crate) fn disarm(mut self) {
        self.reset = None;
    }
}

impl<S, F: FnOnce(&mut S)> Drop for ResetOnDrop<'_, S, F> {
    fn drop(&mut self) {
        if let Some(reset) = self.reset.take() {
            reset(&mut *lock(self.state));
        }
    }
}

/// One independently paginated catalog category
pub struct Feed<T> {
    name: String,
    fetcher: PageFetcher<T>,
    state: Mutex<FeedState<T>>,
}

impl<T: Clone + Send + 'static> Feed<T> {
    pub fn new(name: impl Into<String>, fetcher: PageFetcher<T>) -> Self {
        Self {
            name: name.into(),
            fetcher,
            state: Mutex::new(FeedState::default()),
        }
    }

    pub fn from_fn<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(u32) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Page<T>, SourceError>> + Send + 'static,
    {
        Self::new(name, Arc::new(move |page| f(page).boxed()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fetch a specific page. Page 1 replaces the list, any other page appends.
    pub async fn fetch(&self, page: u32) -> LoadOutcome {
        match self.begin(Some(page)).await {
            Some(page) => self.run(page).await,
            None => LoadOutcome::Skipped,
        }
    }

    pub async fn refresh(&self) -> LoadOutcome {
        self.fetch(1).await
    }

    /// Fetch the page after the last one loaded. Not clamped to `total_pages`;
    /// past the end the response is simply empty.
    pub async fn load_more(&self) -> LoadOutcome {
        match self.begin(None).await {
            Some(page) => self.run(page).await,
            None => LoadOutcome::Skipped,
        }
    }

    pub async fn snapshot(&self) -> FeedSnapshot<T> {
        lock(&self.state).snapshot()
    }

    pub async fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    /// Claim the loading flag and settle which page to request
    async fn begin(&self, page: Option<u32>) -> Option<u32> {
        let mut state = lock(&self.state);
        if state.loading {
            debug!("{}: fetch already pending, skipping", self.name);
            return None;
        }
        state.loading = true;
        Some(page.unwrap_or(state.page + 1))
    }

    async fn run(&self, page: u32) -> LoadOutcome {
        debug!("{}: loading page {}", self.name, page);
        let pending = ResetOnDrop::new(&self.state, |state: &mut FeedState<T>| state.loading = false);
        let result = (self.fetcher)(page).await;
        pending.disarm();

        let mut state = lock(&self.state);
        state.loading = false;
        match result {
            Ok(response) => {
                if page <= 1 {
                    state.items = response.results;
                } else {
                    state.items.extend(response.results);
                }
                state.page = page;
                state.total_pages = response.total_pages;
                state.error = None;
                LoadOutcome::Loaded
            }
            Err(e) => {
                warn!("{}: page {} failed: {}", self.name, page, e);
                state.error = Some(e.to_string());
                LoadOutcome::Failed
            }
        }
    }
}

/// Trending list for a time window. Always replaced wholesale, no load-more.
pub struct TrendingFeed<T> {
    name: String,
    fetcher: WindowFetcher<T>,
    state: Mutex<FeedState<T>>,
    window: Mutex<TimeWindow>,
}

impl<T: Clone + Send + 'static> TrendingFeed<T> {
    pub fn new(name: impl Into<String>, fetcher: WindowFetcher<T>) -> Self {
        Self {
            name: name.into(),
            fetcher,
            state: Mutex::new(FeedState::default()),
            window: Mutex::new(TimeWindow::default()),
        }
    }

    pub fn from_fn<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(TimeWindow) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Page<T>, SourceError>> + Send + 'static,
    {
        Self::new(name, Arc::new(move |window| f(window).boxed()))
    }

    pub async fn fetch(&self, window: TimeWindow) -> LoadOutcome {
        {
            let mut state = lock(&self.state);
            if state.loading {
                debug!("{}: fetch already pending, skipping", self.name);
                return LoadOutcome::Skipped;
            }
            state.loading = true;
        }

        debug!("{}: loading window {}", self.name, window);
        let pending = ResetOnDrop::new(&self.state, |state: &mut FeedState<T>| state.loading = false);
        let result = (self.fetcher)(window).await;
        pending.disarm();

        let mut state = lock(&self.state);
        state.loading = false;
        match result {
            Ok(response) => {
                state.items = response.results;
                state.page = 1;
                state.total_pages = response.total_pages;
                state.error = None;
                *lock(&self.window) = window;
                LoadOutcome::Loaded
            }
            Err(e) => {
                warn!("{}: {} failed: {}", self.name, window, e);
                state.error = Some(e.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Re-fetch the window last loaded successfully (weekly until then)
    pub async fn refresh(&self) -> LoadOutcome {
        let window = *lock(&self.window);
        self.fetch(window).await
    }

    pub async fn window(&self) -> TimeWindow {
        *lock(&self.window)
    }

    pub async fn snapshot(&self) -> FeedSnapshot<T> {
        lock(&self.state).snapshot()
    }

    pub async fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Semaphore;

    fn numbered_page(page: u32, total_pages: u32) -> Page<u32> {
        let start = (page - 1) * 20;
        Page {
            page,
            results: (start..start + 20).collect(),
            total_pages,
            total_results: total_pages as u64 * 20,
        }
    }

    #[tokio::test]
    async fn test_load_more_appends_and_skips_while_pending() {
        let calls = Arc::new(AtomicUsize::new(0));
        let gate = Arc::new(Semaphore::new(0));

        let feed = Arc::new(Feed::from_fn("popular", {
            let calls = calls.clone();
            let gate = gate.clone();
            move |page| {
                let calls = calls.clone();
                let gate = gate.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    if page >= 2 {
                        let _permit = gate.acquire().await.unwrap();
                    }
                    Ok(numbered_page(page, 10))
                }
            }
        }));

        assert_eq!(feed.refresh().await, LoadOutcome::Loaded);
        let first = feed.snapshot().await;
        assert_eq!(first.items.len(), 20);
        assert_eq!(first.total_pages, 10);

        let pending = tokio::spawn({
            let feed = feed.clone();
            async move { feed.load_more().await }
        });
        while !feed.is_loading().await {
            tokio::task::yield_now().await;
        }

        assert_eq!(feed.load_more().await, LoadOutcome::Skipped);
        assert_eq!(feed.fetch(1).await, LoadOutcome::Skipped);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        gate.add_permits(1);
        assert_eq!(pending.await.unwrap(), LoadOutcome::Loaded);

        let snapshot = feed.snapshot().await;
        assert_eq!(snapshot.items.len(), 40);
        assert_eq!(snapshot.page, 2);
        assert_eq!(snapshot.items[20], 20);
        assert!(!snapshot.loading);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cancelled_fetch_releases_loading() {
        let gate = Arc::new(Semaphore::new(0));
        let feed = Feed::from_fn("popular", {
            let gate = gate.clone();
            move |page| {
                let gate = gate.clone();
                async move {
                    if page == 1 {
                        let _permit = gate.acquire().await.unwrap();
                    }
                    Ok(numbered_page(page, 10))
                }
            }
        });

        let abandoned = tokio::time::timeout(Duration::from_millis(20), feed.refresh()).await;
        assert!(abandoned.is_err());
        assert!(!feed.is_loading().await);

        gate.add_permits(1);
        assert_eq!(feed.load_more().await, LoadOutcome::Loaded);
        let snapshot = feed.snapshot().await;
        assert_eq!(snapshot.page, 1);
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_cancelled_trending_fetch_releases_loading() {
        let gate = Arc::new(Semaphore::new(0));
        let feed = TrendingFeed::from_fn("trending", {
            let gate = gate.clone();
            move |window| {
                let gate = gate.clone();
                async move {
                    if window == TimeWindow::Week {
                        let _permit = gate.acquire().await.unwrap();
                    }
                    Ok(numbered_page(1, 1))
                }
            }
        });

        let abandoned = tokio::time::timeout(Duration::from_millis(20), feed.refresh()).await;
        assert!(abandoned.is_err());
        assert!(!feed.is_loading().await);

        assert_eq!(feed.fetch(TimeWindow::Day).await, LoadOutcome::Loaded);
        assert_eq!(feed.window().await, TimeWindow::Day);
    }

    #[tokio::test]
    async fn test_refresh_replaces() {
        let feed = Feed::from_fn("top_rated", |page| async move { Ok(numbered_page(page, 3)) });
        feed.refresh().await;
        feed.load_more().await;
        assert_eq!(feed.snapshot().await.items.len(), 40);

        feed.refresh().await;
        let snapshot = feed.snapshot().await;
        assert_eq!(snapshot.items.len(), 20);
        assert_eq!(snapshot.page, 1);
    }

    #[tokio::test]
    async fn test_first_load_more_fetches_page_one() {
        let feed = Feed::from_fn("upcoming", |page| async move { Ok(numbered_page(page, 2)) });
        assert_eq!(feed.load_more().await, LoadOutcome::Loaded);
        assert_eq!(feed.snapshot().await.page, 1);
    }

    #[tokio::test]
    async fn test_failure_keeps_items() {
        let feed = Feed::from_fn("now_playing", |page| async move {
            if page == 2 {
                Err(SourceError::Api { status: 500, body: "boom".to_string() })
            } else {
                Ok(numbered_page(page, 5))
            }
        });

        feed.refresh().await;
        assert_eq!(feed.load_more().await, LoadOutcome::Failed);

        let snapshot = feed.snapshot().await;
        assert_eq!(snapshot.items.len(), 20);
        assert_eq!(snapshot.page, 1);
        assert!(snapshot.error.as_deref().unwrap().contains("500"));
        assert!(!snapshot.loading);

        feed.refresh().await;
        assert!(feed.snapshot().await.error.is_none());
    }

    #[tokio::test]
    async fn test_trending_replaces_per_window() {
        let feed = TrendingFeed::from_fn("trending", |window| async move {
            let page = match window {
                TimeWindow::Day => numbered_page(1, 1),
                TimeWindow::Week => numbered_page(2, 1),
            };
            Ok(page)
        });

        assert_eq!(feed.fetch(TimeWindow::Day).await, LoadOutcome::Loaded);
        assert_eq!(feed.snapshot().await.items[0], 0);
        assert_eq!(feed.window().await, TimeWindow::Day);

        feed.fetch(TimeWindow::Week).await;
        let snapshot = feed.snapshot().await;
        assert_eq!(snapshot.items.len(), 20);
        assert_eq!(snapshot.items[0], 20);

        assert_eq!(feed.refresh().await, LoadOutcome::Loaded);
        assert_eq!(feed.window().await, TimeWindow::Week);
    }
}

use cinelist_sources::SourceError;
use std::future::Future;
use std::sync::Mutex;
use tracing::{debug, warn};
use crate::feed::{lock, LoadOutcome, ResetOnDrop};

#[derive(Debug, Clone, PartialEq)]
pub struct DetailSnapshot<T> {
    pub value: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

struct SlotState<T> {
    value: Option<T>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

/// Holds the last loaded value of one detail view (a movie, its credits, a season...).
///
/// A failed load records the message and keeps whatever was loaded before.
/// The most recent load owns the slot: an earlier one still in flight is
/// discarded when it returns.
pub struct DetailSlot<T> {
    name: &'static str,
    state: Mutex<SlotState<T>>,
}

impl<T: Clone + Send> DetailSlot<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Mutex::new(SlotState {
                value: None,
                loading: false,
                error: None,
                generation: 0,
            }),
        }
    }

    pub async fn load<F>(&self, request: F) -> LoadOutcome
    where
        F: Future<Output = Result<T, SourceError>>,
    {
        let generation = {
            let mut state = lock(&self.state);
            state.generation = state.generation.wrapping_add(1);
            state.loading = true;
            state.generation
        };

        let pending = ResetOnDrop::new(&self.state, move |state: &mut SlotState<T>| {
            if state.generation == generation {
                state.loading = false;
            }
        });
        let result = request.await;
        pending.disarm();

        let mut state = lock(&self.state);
        if state.generation != generation {
            debug!("{}: superseded by a newer load", self.name);
            return LoadOutcome::Skipped;
        }
        state.loading = false;
        match result {
            Ok(value) => {
                state.value = Some(value);
                state.error = None;
                LoadOutcome::Loaded
            }
            Err(e) => {
                warn!("{} failed: {}", self.name, e);
                state.error = Some(e.to_string());
                LoadOutcome::Failed
            }
        }
    }

    pub async fn value(&self) -> Option<T> {
        lock(&self.state).value.clone()
    }

    pub async fn error(&self) -> Option<String> {
        lock(&self.state).error.clone()
    }

    pub async fn snapshot(&self) -> DetailSnapshot<T> {
        let state = lock(&self.state);
        DetailSnapshot {
            value: state.value.clone(),
            loading: state.loading,
            error: state.error.clone(),
        }
    }

    /// Empty the slot; a load still in flight is discarded when it returns
    pub async fn clear(&self) {
        let mut state = lock(&self.state);
        state.generation = state.generation.wrapping_add(1);
        state.value = None;
        state.loading = false;
        state.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Semaphore;

    #[tokio::test]
    async fn test_failure_keeps_previous_value() {
        let slot: DetailSlot<String> = DetailSlot::new("movie details");

        assert_eq!(slot.load(async { Ok("Fight Club".to_string()) }).await, LoadOutcome::Loaded);
        let outcome = slot
            .load(async { Err(SourceError::Api { status: 404, body: "not found".to_string() }) })
            .await;
        assert_eq!(outcome, LoadOutcome::Failed);

        let snapshot = slot.snapshot().await;
        assert_eq!(snapshot.value.as_deref(), Some("Fight Club"));
        assert!(snapshot.error.unwrap().contains("404"));
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_success_clears_error() {
        let slot: DetailSlot<u32> = DetailSlot::new("season");
        slot.load(async { Err(SourceError::NotFound("season 9".to_string())) }).await;
        assert!(slot.error().await.is_some());

        slot.load(async { Ok(3) }).await;
        assert_eq!(slot.value().await, Some(3));
        assert!(slot.error().await.is_none());

        slot.clear().await;
        assert_eq!(slot.value().await, None);
    }

    #[tokio::test]
    async fn test_latest_load_wins() {
        let gate = Arc::new(Semaphore::new(0));
        let slot: Arc<DetailSlot<String>> = Arc::new(DetailSlot::new("movie details"));

        let first = tokio::spawn({
            let slot = slot.clone();
            let gate = gate.clone();
            async move {
                slot.load(async move {
                    let _permit = gate.acquire().await.unwrap();
                    Ok("Alien".to_string())
                })
                .await
            }
        });
        while !slot.snapshot().await.loading {
            tokio::task::yield_now().await;
        }

        assert_eq!(slot.load(async { Ok("Blade Runner".to_string()) }).await, LoadOutcome::Loaded);
        gate.add_permits(1);
        assert_eq!(first.await.unwrap(), LoadOutcome::Skipped);

        let snapshot = slot.snapshot().await;
        assert_eq!(snapshot.value.as_deref(), Some("Blade Runner"));
        assert!(!snapshot.loading);
    }

    #[tokio::test]
    async fn test_cancelled_load_releases_loading() {
        let gate = Semaphore::new(0);
        let slot: DetailSlot<u32> = DetailSlot::new("credits");

        let abandoned = tokio::time::timeout(
            Duration::from_millis(20),
            slot.load(async {
                let _permit = gate.acquire().await.unwrap();
                Ok(1)
            }),
        )
        .await;
        assert!(abandoned.is_err());
        assert!(!slot.snapshot().await.loading);

        assert_eq!(slot.load(async { Ok(2) }).await, LoadOutcome::Loaded);
        assert_eq!(slot.value().await, Some(2));
    }
}

use crate::error::StorageError;
use crate::storage::Storage;
use chrono::Utc;
use cinelist_models::{ListDocument, ListEntry, ListKind, Listable, Movie, TvSeries};
use serde_json::Value;
use std::marker::PhantomData;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

/// One persisted list (favorites or watchlist) of one content kind.
///
/// Every mutation loads the whole document, changes it and writes it back.
/// The cycle runs under a per-service lock, so concurrent calls on the same
/// service never lose each other's writes and `toggle` is atomic.
pub struct ListService<T: Listable> {
    storage: Storage,
    list: ListKind,
    key: &'static str,
    write_lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Listable> ListService<T> {
    pub fn new(storage: Storage, list: ListKind) -> Self {
        Self {
            storage,
            list,
            key: list.storage_key(T::KIND),
            write_lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub fn list_kind(&self) -> ListKind {
        self.list
    }

    pub fn storage_key(&self) -> &'static str {
        self.key
    }

    /// Insert or overwrite, stamping `addedAt` with the current time
    pub async fn add(&self, record: T) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let result = self.insert_locked(record).await;
        self.logged("add", result)
    }

    /// Removing an id that is not in the list still succeeds. `Ok(_)` means the
    /// list no longer holds `id`; the flag only reports whether an entry was
    /// there to remove.
    pub async fn remove(&self, id: u64) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let result = self.remove_locked(id).await;
        self.logged("remove", result)
    }

    /// Flip membership and return the new state (`true` = now in the list)
    pub async fn toggle(&self, record: T) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().await;
        let id = record.id();
        let result = match self.remove_locked(id).await {
            Ok(true) => Ok(false),
            Ok(false) => self.insert_locked(record).await.map(|()| true),
            Err(e) => Err(e),
        };
        self.logged("toggle", result)
    }

    pub async fn contains(&self, id: u64) -> Result<bool, StorageError> {
        let result = self.load().await.map(|doc| doc.entries.contains_key(&id));
        self.logged("contains", result)
    }

    pub async fn get(&self, id: u64) -> Result<Option<ListEntry<T>>, StorageError> {
        let result = self.load().await.map(|mut doc| doc.entries.remove(&id));
        self.logged("get", result)
    }

    /// All entries, most recently added first
    pub async fn list_all(&self) -> Result<Vec<ListEntry<T>>, StorageError> {
        let result = self.load().await.map(|doc| doc.sorted_entries());
        self.logged("list", result)
    }

    /// Ids in the same order as [`list_all`](Self::list_all)
    pub async fn ids(&self) -> Result<Vec<u64>, StorageError> {
        let entries = self.list_all().await?;
        Ok(entries.iter().map(|e| e.record.id()).collect())
    }

    pub async fn count(&self) -> Result<usize, StorageError> {
        let result = self.load().await.map(|doc| doc.entries.len());
        self.logged("count", result)
    }

    /// Replace the stored document with an empty one
    pub async fn clear_all(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = ListDocument::new();
        let result = self.save(&mut doc).await;
        debug!("Cleared {}", self.key);
        self.logged("clear", result)
    }

    async fn insert_locked(&self, record: T) -> Result<(), StorageError> {
        let mut doc = self.load().await?;
        let id = record.id();
        debug!("Adding {} '{}' to {}", id, record.display_title(), self.key);
        doc.entries.insert(id, ListEntry::new(record, Utc::now()));
        self.save(&mut doc).await
    }

    async fn remove_locked(&self, id: u64) -> Result<bool, StorageError> {
        let mut doc = self.load().await?;
        if doc.entries.remove(&id).is_none() {
            return Ok(false);
        }
        debug!("Removed {} from {}", id, self.key);
        self.save(&mut doc).await?;
        Ok(true)
    }

    async fn load(&self) -> Result<ListDocument<T>, StorageError> {
        let value = match self.storage.get_json::<Value>(self.key).await {
            Ok(Some(value)) => value,
            Ok(None) => return Ok(ListDocument::new()),
            Err(StorageError::Corrupt { reason, .. }) => return self.quarantine(&reason).await,
            Err(e) => return Err(e),
        };

        match ListDocument::from_value(value) {
            Ok(doc) => Ok(doc),
            Err(e) => self.quarantine(&e.to_string()).await,
        }
    }

    /// Keep an unreadable document aside and carry on with an empty list
    async fn quarantine(&self, reason: &str) -> Result<ListDocument<T>, StorageError> {
        warn!("Stored list '{}' is unreadable ({}), starting empty", self.key, reason);
        self.storage.backup(self.key).await?;
        Ok(ListDocument::new())
    }

    async fn save(&self, doc: &mut ListDocument<T>) -> Result<(), StorageError> {
        doc.touch();
        let value = doc.to_value().map_err(|source| StorageError::Serialize {
            key: self.key.to_string(),
            source,
        })?;
        self.storage.set_json(self.key, &value).await
    }

    fn logged<R>(&self, op: &str, result: Result<R, StorageError>) -> Result<R, StorageError> {
        if let Err(ref e) = result {
            error!("{} {} failed: {}", self.key, op, e);
        }
        result
    }
}

/// The four persisted lists
pub struct Lists {
    pub movie_favorites: ListService<Movie>,
    pub movie_watchlist: ListService<Movie>,
    pub tv_favorites: ListService<TvSeries>,
    pub tv_watchlist: ListService<TvSeries>,
}

impl Lists {
    pub fn new(storage: Storage) -> Self {
        Self {
            movie_favorites: ListService::new(storage.clone(), ListKind::Favorites),
            movie_watchlist: ListService::new(storage.clone(), ListKind::Watchlist),
            tv_favorites: ListService::new(storage.clone(), ListKind::Favorites),
            tv_watchlist: ListService::new(storage, ListKind::Watchlist),
        }
    }

    pub fn movies(&self, list: ListKind) -> &ListService<Movie> {
        match list {
            ListKind::Favorites => &self.movie_favorites,
            ListKind::Watchlist => &self.movie_watchlist,
        }
    }

    pub fn tv(&self, list: ListKind) -> &ListService<TvSeries> {
        match list {
            ListKind::Favorites => &self.tv_favorites,
            ListKind::Watchlist => &self.tv_watchlist,
        }
    }

    /// Empty every list
    pub async fn clear_all(&self) -> Result<(), StorageError> {
        self.movie_favorites.clear_all().await?;
        self.movie_watchlist.clear_all().await?;
        self.tv_favorites.clear_all().await?;
        self.tv_watchlist.clear_all().await
    }
}

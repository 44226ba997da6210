pub mod app;
pub mod details;
pub mod error;
pub mod feed;
pub mod lists;
pub mod search;
pub mod storage;

pub use app::{AppState, HomeReport, MovieCatalog, TvCatalog};
pub use details::{DetailSlot, DetailSnapshot};
pub use error::{SetupError, StorageError};
pub use feed::{Feed, FeedSnapshot, LoadOutcome, TrendingFeed};
pub use lists::{ListService, Lists};
pub use search::{SearchFeed, SearchSnapshot};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, Storage};

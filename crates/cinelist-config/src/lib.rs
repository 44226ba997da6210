pub mod config;
pub mod paths;

pub use config::{Config, DataConfig, DataSourceMode, LoggingConfig, StorageConfig, TmdbConfig, DEFAULT_BASE_URL, API_KEY_ENV, BASE_URL_ENV};
pub use paths::{PathManager, home_override};

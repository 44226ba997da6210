use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Environment variable holding the TMDB API key
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Environment variable overriding the TMDB base URL
pub const BASE_URL_ENV: &str = "CINELIST_TMDB_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            language: default_language(),
        }
    }
}

/// Where catalog data comes from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceMode {
    /// Live API when a key is configured, canned fixtures otherwise
    #[default]
    Auto,
    /// Live API only; a missing key is an error
    Live,
    /// Canned fixtures only, never touches the network
    Fixture,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DataConfig {
    #[serde(default)]
    pub source: DataSourceMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// List store directory; defaults to the platform data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise start from defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `TMDB_API_KEY` and `CINELIST_TMDB_BASE_URL` on top of the file values
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(BASE_URL_ENV).ok(),
        );
    }

    pub fn apply_overrides(&mut self, api_key: Option<String>, base_url: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            debug!("TMDB API key taken from environment");
            self.tmdb.api_key = Some(key.trim().to_string());
        }
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.tmdb.base_url = url.trim().to_string();
        }
    }

    /// Configured key, ignoring blanks and the template placeholder
    pub fn api_key(&self) -> Option<&str> {
        self.tmdb
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != "YOUR_API_KEY")
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let base_url = self.tmdb.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(anyhow::anyhow!("tmdb.base_url must start with http:// or https://, got '{}'", base_url));
        }

        if self.tmdb.language.trim().is_empty() {
            return Err(anyhow::anyhow!("tmdb.language cannot be empty"));
        }

        if self.data.source == DataSourceMode::Live && !self.has_api_key() {
            return Err(anyhow::anyhow!(
                "data.source is 'live' but no TMDB API key is configured (set tmdb.api_key or {})",
                API_KEY_ENV
            ));
        }

        Ok(())
    }

    /// Storage directory from config, falling back to the platform default
    pub fn storage_dir(&self, default_dir: PathBuf) -> PathBuf {
        self.storage.dir.clone().unwrap_or(default_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.tmdb.api_key = Some("test_key".to_string());
        config.data.source = DataSourceMode::Fixture;
        config.storage.dir = Some(PathBuf::from("/tmp/cinelist-store"));

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.tmdb.api_key.as_deref(), Some("test_key"));
        assert_eq!(loaded.tmdb.base_url, DEFAULT_BASE_URL);
        assert_eq!(loaded.data.source, DataSourceMode::Fixture);
        assert_eq!(loaded.storage.dir, Some(PathBuf::from("/tmp/cinelist-store")));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[tmdb]\napi_key = \"abc\"\n").unwrap();
        assert_eq!(config.api_key(), Some("abc"));
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.data.source, DataSourceMode::Auto);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.data.source = DataSourceMode::Live;
        assert!(config.validate().is_err());

        config.tmdb.api_key = Some("YOUR_API_KEY".to_string());
        assert!(config.validate().is_err());

        config.tmdb.api_key = Some("real_key".to_string());
        assert!(config.validate().is_ok());

        config.tmdb.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(Some("  env_key ".to_string()), Some("http://127.0.0.1:9000/3".to_string()));
        assert_eq!(config.api_key(), Some("env_key"));
        assert_eq!(config.tmdb.base_url, "http://127.0.0.1:9000/3");

        config.apply_overrides(Some("".to_string()), None);
        assert_eq!(config.api_key(), Some("env_key"));
    }
}

use crate::error::SourceError;
use crate::fixture::FixtureSource;
use crate::tmdb::TmdbClient;
use crate::traits::DataSource;
use cinelist_config::{Config, DataSourceMode};
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, warn};

/// Pick the data source for a configuration.
///
/// `auto` uses the live API when a key is configured and falls back to the
/// fixture catalog otherwise; `live` without a key is an error.
pub fn build_source(config: &Config) -> Result<Arc<dyn DataSource>, SourceError> {
    match config.data.source {
        DataSourceMode::Fixture => {
            info!("Using fixture catalog");
            Ok(Arc::new(FixtureSource::new()))
        }
        DataSourceMode::Live => live_source(config),
        DataSourceMode::Auto => {
            if config.has_api_key() {
                live_source(config)
            } else {
                warn!("No TMDB API key configured, serving the fixture catalog");
                Ok(Arc::new(FixtureSource::new()))
            }
        }
    }
}

fn live_source(config: &Config) -> Result<Arc<dyn DataSource>, SourceError> {
    let api_key = config.api_key().ok_or(SourceError::MissingApiKey)?;

    let http = Client::builder()
        .user_agent(concat!("cinelist/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let client = TmdbClient::with_client(http, &config.tmdb.base_url, api_key)?
        .with_language(&config.tmdb.language);
    info!("Using TMDB API at {}", client.base_url());
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_without_key_uses_fixture() {
        let config = Config::default();
        let source = build_source(&config).unwrap();
        assert_eq!(source.source_name(), "fixture");
    }

    #[test]
    fn test_auto_with_key_uses_live() {
        let mut config = Config::default();
        config.tmdb.api_key = Some("abc123".to_string());
        let source = build_source(&config).unwrap();
        assert_eq!(source.source_name(), "tmdb");
    }

    #[test]
    fn test_live_requires_key() {
        let mut config = Config::default();
        config.data.source = DataSourceMode::Live;
        assert!(matches!(build_source(&config), Err(SourceError::MissingApiKey)));

        config.tmdb.api_key = Some("YOUR_API_KEY".to_string());
        assert!(matches!(build_source(&config), Err(SourceError::MissingApiKey)));
    }

    #[test]
    fn test_fixture_ignores_key() {
        let mut config = Config::default();
        config.data.source = DataSourceMode::Fixture;
        config.tmdb.api_key = Some("abc123".to_string());
        assert_eq!(build_source(&config).unwrap().source_name(), "fixture");
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut config = Config::default();
        config.tmdb.api_key = Some("abc123".to_string());
        config.tmdb.base_url = "api.themoviedb.org".to_string();
        assert!(matches!(build_source(&config), Err(SourceError::InvalidBaseUrl(_))));
    }
}

use async_trait::async_trait;
use serde_json::Value;
use crate::endpoint::Endpoint;
use crate::error::SourceError;

/// Where catalog data comes from.
///
/// The live TMDB client and the static fixture source both implement this, so
/// everything above it is unaware of which one is in use.
#[async_trait]
pub trait DataSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Fetch one endpoint and return the decoded JSON body untouched
    async fn get(&self, endpoint: &Endpoint) -> Result<Value, SourceError>;
}

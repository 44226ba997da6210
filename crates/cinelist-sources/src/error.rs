use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// Non-2xx response; 4xx and 5xx are not distinguished
    #[error("API Error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to decode response for {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No TMDB API key configured (set tmdb.api_key or TMDB_API_KEY)")]
    MissingApiKey,

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("API Error: 404 - {0} not found")]
    NotFound(String),
}

impl SourceError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Api { status, .. } => Some(*status),
            SourceError::NotFound(_) => Some(404),
            SourceError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

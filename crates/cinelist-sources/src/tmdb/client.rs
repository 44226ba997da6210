use crate::endpoint::Endpoint;
use crate::error::SourceError;
use crate::traits::DataSource;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Live TMDB v3 client: one GET helper with the API key appended
#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    language: Option<String>,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, SourceError> {
        Self::with_client(Client::new(), base_url, api_key)
    }

    pub fn with_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(SourceError::InvalidBaseUrl(base_url));
        }

        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(SourceError::MissingApiKey);
        }

        Ok(Self {
            client: Arc::new(client),
            base_url,
            api_key,
            language: None,
        })
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        self.language = if language.trim().is_empty() { None } else { Some(language) };
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL for a path, key and language appended
    pub fn url_for(&self, path: &str) -> String {
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut url = format!(
            "{}{}{}api_key={}",
            self.base_url,
            path,
            separator,
            urlencoding::encode(&self.api_key)
        );
        if let Some(ref language) = self.language {
            url.push_str("&language=");
            url.push_str(&urlencoding::encode(language));
        }
        url
    }

    /// GET a path and return the JSON body. Any non-2xx status is an error carrying
    /// the status code and response text; nothing is retried.
    pub async fn get_path(&self, path: &str) -> Result<Value, SourceError> {
        // Log the path only; the full URL carries the key
        debug!("GET {}", path);

        let response = self
            .client
            .get(self.url_for(path))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| SourceError::Request(e.without_url()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("TMDB request {} failed: {}", path, status);
            return Err(SourceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SourceError::Request(e.without_url()))
    }
}

#[async_trait]
impl DataSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn get(&self, endpoint: &Endpoint) -> Result<Value, SourceError> {
        self.get_path(&endpoint.path()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinelist_models::{ContentKind, MovieCategory};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Accept one connection, answer with a canned response, return the raw request
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 16 * 1024];
            let mut read = 0;
            loop {
                let n = socket.read(&mut buf[read..]).await.unwrap();
                if n == 0 {
                    break;
                }
                read += n;
                if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&buf[..read]).to_string()
        });

        (format!("http://{}", addr), handle)
    }

    fn client(base_url: &str) -> TmdbClient {
        let http = Client::builder().no_proxy().build().unwrap();
        TmdbClient::with_client(http, base_url, "secret-key").unwrap()
    }

    #[test]
    fn test_url_for_appends_key() {
        let client = client("https://api.themoviedb.org/3/");
        assert_eq!(
            client.url_for("/movie/550"),
            "https://api.themoviedb.org/3/movie/550?api_key=secret-key"
        );
        assert_eq!(
            client.url_for("/movie/popular?page=2"),
            "https://api.themoviedb.org/3/movie/popular?page=2&api_key=secret-key"
        );

        let localized = client.with_language("en-US");
        assert!(localized.url_for("/tv/1").ends_with("?api_key=secret-key&language=en-US"));
    }

    #[test]
    fn test_rejects_bad_configuration() {
        assert!(matches!(
            TmdbClient::new("api.themoviedb.org", "key"),
            Err(SourceError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            TmdbClient::new("https://api.themoviedb.org/3", "  "),
            Err(SourceError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn test_get_returns_body() {
        let (base, server) = serve_once("200 OK", r#"{"page":1,"results":[],"total_pages":10,"total_results":200}"#).await;
        let client = client(&base);

        let value = client
            .get(&Endpoint::MovieList { category: MovieCategory::Popular, page: 1 })
            .await
            .unwrap();
        assert_eq!(value["total_pages"], 10);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /movie/popular?page=1&api_key=secret-key HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let (base, server) = serve_once(
            "404 Not Found",
            r#"{"status_code":34,"status_message":"The resource you requested could not be found."}"#,
        )
        .await;
        let client = client(&base);

        let err = client
            .get(&Endpoint::Details { kind: ContentKind::Movie, id: 999_999 })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("could not be found"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let (base, server) = serve_once("503 Service Unavailable", "down").await;
        let client = client(&base);

        let err = client.get_path("/movie/upcoming?page=1").await.unwrap_err();
        assert!(matches!(err, SourceError::Api { status: 503, .. }));
        let request = server.await.unwrap();
        assert!(request.contains("/movie/upcoming?page=1&api_key="));
    }
}

//! Upstream channel catalog source
//!
//! One GET per request, no retries and no caching. The HTTP call sits behind
//! [`CatalogClient`] so handlers can be driven by a fake upstream in tests.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::UpstreamConfig;
use crate::errors::{AppResult, DecodeError, FetchError, FetchResult};
use crate::models::ChannelRecord;
use crate::utils::UrlUtils;

/// Fetches the raw catalog body from the upstream media API
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_catalog(&self, url: &str) -> FetchResult<Vec<u8>>;
}

/// reqwest-backed catalog client
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    client: Client,
    check_status: bool,
}

impl HttpCatalogClient {
    /// Create a client using the transport's default timeouts
    pub fn new() -> FetchResult<Self> {
        Self::build(None, false)
    }

    /// Create a client from the `[upstream]` configuration section
    pub fn from_config(config: &UpstreamConfig) -> FetchResult<Self> {
        Self::build(config.timeout, config.check_status)
    }

    fn build(timeout: Option<Duration>, check_status: bool) -> FetchResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| FetchError::Client {
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            check_status,
        })
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_catalog(&self, url: &str) -> FetchResult<Vec<u8>> {
        let safe_url = UrlUtils::obfuscate_credentials(url);
        info!("Attempting to fetch channel catalog from: {}", safe_url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| {
                let message = UrlUtils::obfuscate_credentials(&e.to_string());
                if e.is_builder() {
                    FetchError::invalid_request(&safe_url, message)
                } else {
                    FetchError::transport(&safe_url, message)
                }
            })?;

        let status = response.status();
        if self.check_status && !status.is_success() {
            return Err(FetchError::Status {
                url: safe_url,
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            debug!("Upstream returned HTTP {} (status checks disabled)", status.as_u16());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::body(&safe_url, e.to_string()))?;

        debug!("Fetched {} bytes of catalog content", bytes.len());
        Ok(bytes.to_vec())
    }
}

/// Decode a catalog body into channel records.
///
/// The body must be a JSON array. A `null` element decodes to an all-default
/// record so positions are kept, and a top-level `null` is an empty catalog.
pub fn decode_channels(bytes: &[u8]) -> Result<Vec<ChannelRecord>, DecodeError> {
    let records: Option<Vec<Option<ChannelRecord>>> = serde_json::from_slice(bytes)?;
    Ok(records
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Fetch-then-decode pipeline shared by every handler
#[derive(Clone)]
pub struct CatalogSource {
    client: Arc<dyn CatalogClient>,
}

impl CatalogSource {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self { client }
    }

    /// Fetch the catalog at `url` and decode it. Failures are logged here
    /// and returned unchanged.
    pub async fn load_channels(&self, url: &str) -> AppResult<Vec<ChannelRecord>> {
        let bytes = self.client.fetch_catalog(url).await.inspect_err(|e| {
            error!("Error fetching channel catalog: {}", e);
        })?;

        let channels = decode_channels(&bytes).inspect_err(|e| {
            error!("Error parsing channels JSON: {}", e);
        })?;

        debug!("Decoded {} channel records", channels.len());
        Ok(channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use axum::{Router, http::HeaderMap, http::StatusCode, routing::get};

    struct StaticClient(&'static str);

    #[async_trait]
    impl CatalogClient for StaticClient {
        async fn fetch_catalog(&self, _url: &str) -> FetchResult<Vec<u8>> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    struct FailingClient;

    #[async_trait]
    impl CatalogClient for FailingClient {
        async fn fetch_catalog(&self, url: &str) -> FetchResult<Vec<u8>> {
            Err(FetchError::transport(url, "connection refused"))
        }
    }

    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_decode_channels_in_order() {
        let channels = decode_channels(br#"[{"_id":"1","title":"A"},{"_id":"2","title":"B"}]"#).unwrap();
        let ids: Vec<_> = channels.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn test_decode_object_instead_of_array_fails() {
        let result = decode_channels(br#"{"_id":"1","title":"A"}"#);
        assert!(matches!(result, Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_truncated_json_fails() {
        assert!(decode_channels(br#"[{"_id":"1""#).is_err());
        assert!(decode_channels(b"").is_err());
    }

    #[test]
    fn test_decode_nulls() {
        assert!(decode_channels(b"null").unwrap().is_empty());

        let channels = decode_channels(br#"[null,{"_id":"2"}]"#).unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels[0], ChannelRecord::default());
        assert_eq!(channels[1].id, "2");
    }

    #[tokio::test]
    async fn test_load_channels_decodes_body() {
        let source = CatalogSource::new(Arc::new(StaticClient(r#"[{"_id":"7","title":"Seven"}]"#)));
        let channels = source.load_channels("http://unused").await.unwrap();
        assert_eq!(channels[0].title, "Seven");
    }

    #[tokio::test]
    async fn test_load_channels_keeps_error_category() {
        let source = CatalogSource::new(Arc::new(FailingClient));
        let err = source.load_channels("http://unused").await.unwrap_err();
        assert!(matches!(err, AppError::Fetch(FetchError::Transport { .. })));

        let source = CatalogSource::new(Arc::new(StaticClient("{}")));
        let err = source.load_channels("http://unused").await.unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[tokio::test]
    async fn test_http_client_sends_json_headers() {
        let router = Router::new().route(
            "/live",
            get(|headers: HeaderMap| async move {
                let accept = headers.get("accept").and_then(|v| v.to_str().ok()).unwrap_or("");
                let content_type = headers.get("content-type").and_then(|v| v.to_str().ok()).unwrap_or("");
                format!(r#"[{{"_id":"{accept}","title":"{content_type}"}}]"#)
            }),
        );
        let base = spawn_upstream(router).await;

        let client = HttpCatalogClient::new().unwrap();
        let body = client.fetch_catalog(&format!("{base}/live")).await.unwrap();
        let channels = decode_channels(&body).unwrap();
        assert_eq!(channels[0].id, "application/json");
        assert_eq!(channels[0].title, "application/json");
    }

    #[tokio::test]
    async fn test_http_client_status_check_is_optional() {
        let router = Router::new().route("/missing", get(|| async { (StatusCode::NOT_FOUND, "[]") }));
        let base = spawn_upstream(router).await;
        let url = format!("{base}/missing");

        let lenient = HttpCatalogClient::new().unwrap();
        assert_eq!(lenient.fetch_catalog(&url).await.unwrap(), b"[]");

        let strict = HttpCatalogClient::from_config(&UpstreamConfig {
            check_status: true,
            ..Default::default()
        })
        .unwrap();
        let err = strict.fetch_catalog(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_http_client_rejects_empty_url() {
        let client = HttpCatalogClient::new().unwrap();
        let err = client.fetch_catalog("").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest { .. }));
    }
}

//! HTTP Location Source
//!
//! Implements LocationSource on top of reqwest against the ipstack REST API.
//!
//! See: https://ipstack.com/documentation

use crate::config::{ClientConfig, ConfigError};
use crate::domain::error::IpStackError;
use crate::domain::ports::LocationSource;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Name of the query parameter carrying the access key.
const ACCESS_KEY_PARAM: &str = "access_key";

/// reqwest-backed location source.
///
/// Requests go to `<base_url>/<addresses>?access_key=<key>` with the
/// configured timeout. Cloning is cheap and clones share one connection pool.
#[derive(Clone)]
pub struct HttpLocationSource {
    client: reqwest::Client,
    base_url: String,
    access_key: String,
    timeout: Duration,
}

impl HttpLocationSource {
    /// Build a source from a validated configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
            timeout: config.timeout,
        })
    }

    /// Request URL for a path segment, without the access key.
    fn url(&self, addresses: &str) -> String {
        format!("{}/{}", self.base_url, addresses)
    }

    fn request_error(err: reqwest::Error) -> IpStackError {
        // the URL carries the access key in its query string
        let err = err.without_url();
        if err.is_timeout() {
            IpStackError::Network(format!(
                "An error occurred with the request to the API: timed out: {}",
                err
            ))
        } else {
            IpStackError::Network(format!(
                "An error occurred with the request to the API: {}",
                err
            ))
        }
    }
}

impl std::fmt::Debug for HttpLocationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpLocationSource")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LocationSource for HttpLocationSource {
    async fn fetch(&self, addresses: &str) -> Result<Value, IpStackError> {
        let url = self.url(addresses);
        tracing::debug!("GET {} timeout={:?}", url, self.timeout);

        let response = self
            .client
            .get(&url)
            .query(&[(ACCESS_KEY_PARAM, self.access_key.as_str())])
            .send()
            .await
            .map_err(Self::request_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("GET {} failed with status {}", url, status);
            return Err(IpStackError::Network(format!(
                "An error occurred with the request to the API: unexpected status {}",
                status
            )));
        }

        let body = response.text().await.map_err(Self::request_error)?;

        serde_json::from_str(&body).map_err(|e| {
            IpStackError::InvalidResponse(format!("API response is not valid JSON: {}", e))
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(base_url: &str) -> HttpLocationSource {
        let config = ClientConfig::new("some-token").base_url(base_url);
        HttpLocationSource::new(&config).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ClientConfig::new("");
        let result = HttpLocationSource::new(&config);
        assert!(matches!(result, Err(ConfigError::MissingAccessKey)));
    }

    #[test]
    fn test_url_strips_trailing_slash() {
        let source = source("http://api.ipstack.com/");
        assert_eq!(source.url("8.8.8.8"), "http://api.ipstack.com/8.8.8.8");
        assert_eq!(
            source.url("8.8.8.8,1.1.1.1"),
            "http://api.ipstack.com/8.8.8.8,1.1.1.1"
        );
    }

    #[test]
    fn test_debug_hides_access_key() {
        let source = source("http://api.ipstack.com");
        let debug_str = format!("{:?}", source);
        assert!(debug_str.contains("api.ipstack.com"));
        assert!(!debug_str.contains("some-token"));
    }

    #[test]
    fn test_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpLocationSource>();
    }

    // ===== Integration Tests with Mock HTTP Server =====

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let mock_server = MockServer::start().await;

        let body = serde_json::json!({ "ip": "8.8.8.8", "country_code": "US" });

        Mock::given(method("GET"))
            .and(path("/8.8.8.8"))
            .and(query_param("access_key", "some-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = source(&mock_server.uri()).fetch("8.8.8.8").await;

        assert_eq!(result.unwrap(), body);
    }

    #[tokio::test]
    async fn test_fetch_passes_error_envelope_through() {
        let mock_server = MockServer::start().await;

        let body = serde_json::json!({
            "success": false,
            "error": { "code": 104, "type": "usage_limit_reached", "info": "limit" }
        });

        Mock::given(method("GET"))
            .and(path("/8.8.8.8"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&mock_server)
            .await;

        let result = source(&mock_server.uri()).fetch("8.8.8.8").await;

        assert_eq!(result.unwrap(), body);
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_network() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/8.8.8.8"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let err = source(&mock_server.uri()).fetch("8.8.8.8").await.unwrap_err();

        assert!(matches!(err, IpStackError::Network(_)));
        assert!(err.message().contains("500"));
    }

    #[tokio::test]
    async fn test_fetch_non_json_body_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/8.8.8.8"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let err = source(&mock_server.uri()).fetch("8.8.8.8").await.unwrap_err();

        assert!(matches!(err, IpStackError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_network() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/8.8.8.8"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let config = ClientConfig::new("some-token")
            .base_url(mock_server.uri())
            .timeout_millis(50);
        let source = HttpLocationSource::new(&config).unwrap();

        let err = source.fetch("8.8.8.8").await.unwrap_err();

        assert!(matches!(err, IpStackError::Network(_)));
        assert!(err.message().contains("timed out"));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_network() {
        // nothing listens on port 1
        let err = source("http://127.0.0.1:1").fetch("8.8.8.8").await.unwrap_err();

        assert!(matches!(err, IpStackError::Network(_)));
        assert!(!err.message().contains("some-token"));
    }
}

use std::fmt;
use std::time::Duration;

/// Default upstream endpoint.
pub const DEFAULT_BASE_URL: &str = "http://api.ipstack.com";

/// Default overall request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Client configuration. Fixed once a client has been built from it.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Access key sent as the `access_key` query parameter
    pub access_key: String,
    /// Overall timeout of a single HTTP request
    pub timeout: Duration,
    /// Extra attempts after a transport failure (0 = never retry)
    pub max_retries: u32,
    /// Base URL of the API, without a trailing path
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: 0,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with the given access key and defaults for
    /// everything else.
    pub fn new(access_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the request timeout in milliseconds.
    pub fn timeout_millis(self, millis: u64) -> Self {
        self.timeout(Duration::from_millis(millis))
    }

    /// Set how many times a request is re-sent after a transport failure.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base URL of the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_key.trim().is_empty() {
            return Err(ConfigError::MissingAccessKey);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        match reqwest::Url::parse(&self.base_url) {
            Ok(url) if url.cannot_be_a_base() => {
                return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()))
            }
            Ok(_) => {}
            Err(_) => return Err(ConfigError::InvalidBaseUrl(self.base_url.clone())),
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("access_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("access_key is required")]
    MissingAccessKey,
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
    #[error("invalid base_url: {0}")]
    InvalidBaseUrl(String),
    #[error("failed to build the HTTP client: {0}")]
    HttpClient(String),
}

/// Load the client configuration from the process environment.
pub fn load_config() -> anyhow::Result<ClientConfig> {
    load_config_from(|key| std::env::var(key).ok())
}

/// Load the client configuration through `lookup`, which maps an
/// environment variable name to its value.
///
/// | variable              | default                  |
/// |-----------------------|--------------------------|
/// | `IPSTACK_ACCESS_KEY`  | required                 |
/// | `IPSTACK_TIMEOUT_MS`  | 5000                     |
/// | `IPSTACK_MAX_RETRIES` | 0                        |
/// | `IPSTACK_BASE_URL`    | `http://api.ipstack.com` |
///
/// Unparsable numbers fall back to their default.
pub fn load_config_from<F>(lookup: F) -> anyhow::Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let access_key = lookup("IPSTACK_ACCESS_KEY")
        .ok_or_else(|| anyhow::anyhow!("IPSTACK_ACCESS_KEY is not set"))?;

    let timeout_ms = lookup("IPSTACK_TIMEOUT_MS")
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT.as_millis() as u64);

    let max_retries = lookup("IPSTACK_MAX_RETRIES")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let base_url = lookup("IPSTACK_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let config = ClientConfig::new(access_key)
        .timeout_millis(timeout_ms)
        .max_retries(max_retries)
        .base_url(base_url);

    config.validate()?;

    Ok(config)
}

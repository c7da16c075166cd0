//! IP Stack Client - Main application use case
//!
//! Orchestrates a lookup: validating addresses, fetching the payload through
//! the location source, telling error envelopes from locations, and wrapping
//! the result. This is the primary interface for calling applications.

use crate::adapters::outbound::HttpLocationSource;
use crate::config::{ClientConfig, ConfigError};
use crate::domain::entities::Location;
use crate::domain::error::IpStackError;
use crate::domain::ports::LocationSource;
use crate::domain::services::ErrorMapper;
use crate::domain::value_objects::IpAddress;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// The `error` object of an unsuccessful API response.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    code: i64,
    #[serde(rename = "type", default)]
    error_type: String,
    #[serde(default)]
    info: String,
}

/// Client for the ipstack geolocation API.
///
/// Cloning is cheap; clones share the same location source.
#[derive(Clone)]
pub struct IpStackClient {
    source: Arc<dyn LocationSource>,
    max_retries: u32,
}

impl IpStackClient {
    /// Create a client talking to the API over HTTP.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the configuration does not validate or
    /// the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let source = HttpLocationSource::new(&config)?;
        Ok(Self::with_source(&config, Arc::new(source)))
    }

    /// Create a client on top of any location source.
    ///
    /// Only `max_retries` is read from `config`; transport settings belong
    /// to the source.
    pub fn with_source(config: &ClientConfig, source: Arc<dyn LocationSource>) -> Self {
        Self {
            source,
            max_retries: config.max_retries,
        }
    }

    /// Resolve the location of a single IPv4 address.
    ///
    /// # Errors
    /// - [`IpStackError::InvalidAddress`] if `ip_address` is not a dotted-quad
    ///   IPv4 address. No request is made.
    /// - [`IpStackError::Network`] if the request fails.
    /// - One of the API error kinds if the API reports an error.
    /// - [`IpStackError::InvalidResponse`] if the body is not a location.
    #[tracing::instrument(skip(self))]
    pub async fn get_location(&self, ip_address: &str) -> Result<Location, IpStackError> {
        let address = IpAddress::parse(ip_address)?;

        let body = self.fetch(address.as_str()).await?;

        Self::decode(body)
    }

    /// Resolve several IPv4 addresses with one bulk request.
    ///
    /// Locations are returned in the order of the response, which follows
    /// the order of `ip_addresses`. The first invalid address fails the
    /// whole batch before any request is made, and an empty batch returns
    /// an empty list without a request.
    ///
    /// # Errors
    /// Same as [`get_location`](Self::get_location), applied to the batch.
    #[tracing::instrument(skip_all, fields(count = ip_addresses.len()))]
    pub async fn get_multiple_locations<S>(
        &self,
        ip_addresses: &[S],
    ) -> Result<Vec<Location>, IpStackError>
    where
        S: AsRef<str>,
    {
        let addresses = ip_addresses
            .iter()
            .map(|ip| IpAddress::parse(ip.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        if addresses.is_empty() {
            return Ok(Vec::new());
        }

        let body = self.fetch(&IpAddress::join(&addresses)).await?;

        let items = match body {
            Value::Array(items) => items,
            // a bulk request for a single address may come back unwrapped
            single @ Value::Object(_) => vec![single],
            other => {
                return Err(IpStackError::InvalidResponse(format!(
                    "expected a list of locations, got {}",
                    json_kind(&other)
                )))
            }
        };

        items
            .into_iter()
            .map(Self::decode)
            .collect()
    }

    /// Fetch a body and reject error envelopes, re-sending after transport
    /// failures up to `max_retries` times.
    async fn fetch(&self, addresses: &str) -> Result<Value, IpStackError> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            tracing::debug!("requesting {} (attempt {})", addresses, attempt);

            match self.source.fetch(addresses).await {
                Ok(body) => return Self::check_response(body),
                Err(err) if err.is_retryable() && attempt <= self.max_retries => {
                    tracing::warn!(
                        "attempt {} of {} failed, retrying: {}",
                        attempt,
                        self.max_retries + 1,
                        err
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Turn an error envelope into the matching error kind.
    ///
    /// Only the `error` object decides: a body carrying one is an error
    /// whatever its `success` flag says, and a body without one is a
    /// location.
    fn check_response(body: Value) -> Result<Value, IpStackError> {
        if let Some(error) = body.get("error").filter(|e| e.is_object()) {
            let envelope = ErrorEnvelope::deserialize(error).map_err(|e| {
                IpStackError::InvalidResponse(format!("malformed error response: {}", e))
            })?;
            tracing::debug!(
                "API error code={} type={}",
                envelope.code,
                envelope.error_type
            );
            return Err(ErrorMapper::wrap_error(
                envelope.code,
                &envelope.error_type,
                &envelope.info,
            ));
        }

        Ok(body)
    }

    fn decode(body: Value) -> Result<Location, IpStackError> {
        Location::from_value(body).map_err(|e| {
            IpStackError::InvalidResponse(format!(
                "API response does not match the location model: {}",
                e
            ))
        })
    }
}

impl std::fmt::Debug for IpStackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpStackClient")
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

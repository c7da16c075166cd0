//! Location Source Port
//!
//! Defines the interface for fetching raw geolocation payloads.

use crate::domain::error::IpStackError;
use async_trait::async_trait;
use serde_json::Value;

/// Source of raw geolocation responses.
///
/// This is an outbound port that abstracts the HTTP collaborator.
/// Implementations issue a single GET for the given path segment (one
/// address, or several joined with commas) and return the decoded JSON
/// body untouched. Response discrimination happens in the client.
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Fetch the JSON body for `addresses`.
    ///
    /// Transport failures and non-2xx statuses are reported as
    /// [`IpStackError::Network`]; bodies that are not JSON as
    /// [`IpStackError::InvalidResponse`].
    async fn fetch(&self, addresses: &str) -> Result<Value, IpStackError>;
}

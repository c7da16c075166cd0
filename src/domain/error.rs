//! Error Taxonomy
//!
//! Every failure the client can surface, as one closed enum.
//! Each variant carries a human-readable message.

/// Errors returned by [`IpStackClient`](crate::IpStackClient) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IpStackError {
    /// The input was not a dotted-quad IPv4 address. Never reaches the network.
    #[error("{0}")]
    InvalidAddress(String),

    /// The HTTP request failed (connection, DNS, timeout or non-2xx status).
    #[error("{0}")]
    Network(String),

    /// The API response could not be decoded into the location model.
    #[error("{0}")]
    InvalidResponse(String),

    /// API code 101, type `missing_access_key`.
    #[error("{0}")]
    MissingAccessKey(String),

    /// API code 101 with any other type.
    #[error("{0}")]
    InvalidAccessKey(String),

    /// API code 102.
    #[error("{0}")]
    InactiveUser(String),

    /// API code 104.
    #[error("{0}")]
    UsageLimitReached(String),

    /// Any API error code not covered above.
    #[error("{0}")]
    Unknown(String),
}

impl IpStackError {
    /// The message carried by this error.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidAddress(msg)
            | Self::Network(msg)
            | Self::InvalidResponse(msg)
            | Self::MissingAccessKey(msg)
            | Self::InvalidAccessKey(msg)
            | Self::InactiveUser(msg)
            | Self::UsageLimitReached(msg)
            | Self::Unknown(msg) => msg,
        }
    }

    /// Whether the error was reported by the API itself.
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            Self::MissingAccessKey(_)
                | Self::InvalidAccessKey(_)
                | Self::InactiveUser(_)
                | Self::UsageLimitReached(_)
                | Self::Unknown(_)
        )
    }

    /// Whether sending the same request again could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

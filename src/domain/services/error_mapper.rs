//! Error Mapper Service
//!
//! Pure domain logic translating an API error envelope into an error kind.
//! This service has NO external dependencies - it's pure Rust.

use crate::domain::error::IpStackError;

/// Error code for missing or invalid access keys.
pub const CODE_ACCESS_KEY: i64 = 101;
/// Error code for an inactive account.
pub const CODE_INACTIVE_USER: i64 = 102;
/// Error code for an exhausted monthly quota.
pub const CODE_USAGE_LIMIT_REACHED: i64 = 104;

/// Error type that distinguishes a missing key from an invalid one under code 101.
pub const TYPE_MISSING_ACCESS_KEY: &str = "missing_access_key";

/// Maps API error envelopes onto [`IpStackError`] variants.
pub struct ErrorMapper;

impl ErrorMapper {
    /// Wrap an unsuccessful API response in the matching error kind.
    ///
    /// | code | type                 | result            |
    /// |------|----------------------|-------------------|
    /// | 101  | `missing_access_key` | MissingAccessKey  |
    /// | 101  | anything else        | InvalidAccessKey  |
    /// | 102  | any                  | InactiveUser      |
    /// | 104  | any                  | UsageLimitReached |
    /// | *    | any                  | Unknown           |
    ///
    /// `info` is carried verbatim as the error message.
    pub fn wrap_error(code: i64, error_type: &str, info: &str) -> IpStackError {
        let info = info.to_string();
        match code {
            CODE_ACCESS_KEY if error_type == TYPE_MISSING_ACCESS_KEY => {
                IpStackError::MissingAccessKey(info)
            }
            CODE_ACCESS_KEY => IpStackError::InvalidAccessKey(info),
            CODE_INACTIVE_USER => IpStackError::InactiveUser(info),
            CODE_USAGE_LIMIT_REACHED => IpStackError::UsageLimitReached(info),
            _ => IpStackError::Unknown(info),
        }
    }
}

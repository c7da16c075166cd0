//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use crate::domain::error::IpStackError;
use std::fmt;

/// A textual IPv4 address that passed dotted-quad validation.
///
/// Each of the four octets is one to three ASCII digits with a value of at
/// most 255. Leading zeros are accepted as long as the octet stays within
/// three digits (`010.0.0.1` is valid, `0001.0.0.1` is not). The original
/// spelling is kept so it is sent to the API exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpAddress(String);

impl IpAddress {
    /// Validate and wrap an address.
    ///
    /// # Examples
    /// ```
    /// use ipstack_client::IpAddress;
    ///
    /// assert!(IpAddress::parse("100.100.100.100").is_ok());
    /// assert!(IpAddress::parse("256.0.0.1").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, IpStackError> {
        if Self::is_valid(input) {
            Ok(Self(input.to_string()))
        } else {
            Err(IpStackError::InvalidAddress(format!(
                "{} is an invalid IPv4 address.",
                input
            )))
        }
    }

    /// Whether `input` is a dotted-quad IPv4 address.
    pub fn is_valid(input: &str) -> bool {
        let mut octets = 0;
        for part in input.split('.') {
            octets += 1;
            if octets > 4 || !Self::is_valid_octet(part) {
                return false;
            }
        }
        octets == 4
    }

    fn is_valid_octet(part: &str) -> bool {
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        // at most three digits, so this cannot overflow
        part.parse::<u16>().map(|v| v <= 255).unwrap_or(false)
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join validated addresses into the comma-separated path segment used
    /// for bulk lookups.
    pub fn join(addresses: &[IpAddress]) -> String {
        addresses
            .iter()
            .map(IpAddress::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    // ===== Valid Address Tests =====

    #[test]
    fn test_valid_addresses() {
        let tests = vec![
            "0.0.0.0",
            "100.100.100.100",
            "255.255.255.255",
            "8.8.8.8",
            "192.168.1.1",
            "249.250.251.199",
            "1.2.3.4",
        ];

        for input in tests {
            assert!(IpAddress::is_valid(input), "{} should be valid", input);
        }
    }

    #[test]
    fn test_leading_zeros_within_three_digits() {
        assert!(IpAddress::is_valid("010.001.000.099"));
        assert!(IpAddress::is_valid("00.0.0.0"));
        assert!(!IpAddress::is_valid("0001.0.0.0"));
    }

    // ===== Invalid Address Tests =====

    #[test]
    fn test_out_of_range_octets() {
        let tests = vec!["256.0.0.0", "0.0.0.256", "300.1.1.1", "999.999.999.999"];

        for input in tests {
            assert!(!IpAddress::is_valid(input), "{} should be invalid", input);
        }
    }

    #[test]
    fn test_wrong_octet_count() {
        let tests = vec!["", "1", "1.2.3", "1.2.3.4.5", "1.2.3.", ".1.2.3", "1..2.3"];

        for input in tests {
            assert!(!IpAddress::is_valid(input), "{:?} should be invalid", input);
        }
    }

    #[test]
    fn test_extra_characters_rejected() {
        let tests = vec![
            "ipAddress",
            " 1.2.3.4",
            "1.2.3.4 ",
            "1.2.3.4\n",
            "a1.2.3.4",
            "1.2.3.4/24",
            "+1.2.3.4",
            "1.2.3.-4",
            "::1",
            "1.2.3.4,5.6.7.8",
            "١.٢.٣.٤",
        ];

        for input in tests {
            assert!(!IpAddress::is_valid(input), "{:?} should be invalid", input);
        }
    }

    // ===== parse Tests =====

    #[test]
    fn test_parse_keeps_original_spelling() {
        let ip = IpAddress::parse("010.0.0.1").unwrap();
        assert_eq!(ip.as_str(), "010.0.0.1");
        assert_eq!(ip.to_string(), "010.0.0.1");
    }

    #[test]
    fn test_parse_error_includes_input() {
        let err = IpAddress::parse("ipAddress").unwrap_err();
        assert_eq!(
            err,
            IpStackError::InvalidAddress("ipAddress is an invalid IPv4 address.".to_string())
        );
        assert!(err.message().contains("ipAddress"));
    }

    // ===== join Tests =====

    #[test]
    fn test_join_addresses() {
        let ips = vec![
            IpAddress::parse("100.100.100.100").unwrap(),
            IpAddress::parse("8.8.8.8").unwrap(),
        ];
        assert_eq!(IpAddress::join(&ips), "100.100.100.100,8.8.8.8");
    }

    #[test]
    fn test_join_single_and_empty() {
        let ips = vec![IpAddress::parse("1.1.1.1").unwrap()];
        assert_eq!(IpAddress::join(&ips), "1.1.1.1");
        assert_eq!(IpAddress::join(&[]), "");
    }
}

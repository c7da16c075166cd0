//! ipstack-client Library
//!
//! Typed async client for the ipstack IP geolocation API: resolves IPv4
//! addresses to locations and maps API error codes to typed errors.
//!
//! ```no_run
//! use ipstack_client::{ClientConfig, IpStackClient};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = IpStackClient::new(ClientConfig::new("YOUR_ACCESS_KEY"))?;
//! let location = client.get_location("134.201.250.155").await?;
//! if let (Some(name), Some(code)) = (location.country_name(), location.country_code()) {
//!     println!("{} ({})", name, code);
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;

// Re-export commonly used types
pub use adapters::outbound::HttpLocationSource;
pub use application::IpStackClient;
pub use config::{load_config, ClientConfig, ConfigError};
pub use domain::entities::{Language, Location, LocationDetails, LocationResponse};
pub use domain::error::IpStackError;
pub use domain::ports::LocationSource;
pub use domain::services::ErrorMapper;
pub use domain::value_objects::IpAddress;

//! Domain Entities - Core business objects
//!
//! These entities model the geolocation payload returned by the API and the
//! read-only view the client hands back to callers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An official language of a location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    /// ISO 639-1 code (en, fr, de, etc)
    pub code: String,
    /// English name of the language
    pub name: String,
    /// Name of the language in the language itself
    pub native: String,
}

/// The nested `location` block of a geolocation response.
///
/// Every field may be null or absent; reserved and private ranges come back
/// mostly empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocationDetails {
    pub geoname_id: Option<u64>,
    /// Capital city of the country
    pub capital: Option<String>,
    /// Official languages, in the order the API lists them
    pub languages: Option<Vec<Language>>,
    /// URL of the country flag image
    pub country_flag: Option<String>,
    pub country_flag_emoji: Option<String>,
    pub country_flag_emoji_unicode: Option<String>,
    /// International dialling prefix without the leading `+`
    pub calling_code: Option<String>,
    /// Whether the country is a member of the European Union
    pub is_eu: Option<bool>,
}

/// Typed view of a geolocation response for a single IP address.
///
/// Decoding never fails on null or missing fields, only on a value of the
/// wrong type. Fields the API sends beyond these are only available through
/// [`Location::raw_location_data`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocationResponse {
    /// The IP address that was looked up
    pub ip: Option<String>,
    /// Address family as reported by the API (ipv4, ipv6)
    #[serde(rename = "type")]
    pub ip_type: Option<String>,
    pub continent_code: Option<String>,
    pub continent_name: Option<String>,
    /// Country code (ISO 3166-1 alpha-2: ZA, DE, US, etc)
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub region_code: Option<String>,
    pub region_name: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Location specific data
    pub location: Option<LocationDetails>,
}

/// Read-only view over one geolocation response.
///
/// A `Location` owns the body exactly as received plus a typed view decoded
/// from it, and never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    raw: Value,
    data: LocationResponse,
}

impl Location {
    /// Wrap a raw response body.
    ///
    /// Fails only if the body is not an object or a field holds a value of
    /// the wrong type.
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        let data = LocationResponse::deserialize(&raw)?;
        Ok(Self { raw, data })
    }

    fn details(&self) -> Option<&LocationDetails> {
        self.data.location.as_ref()
    }

    /// The IP address this location was resolved for.
    pub fn ip(&self) -> Option<&str> {
        self.data.ip.as_deref()
    }

    /// Address family (`ipv4` or `ipv6`).
    pub fn ip_type(&self) -> Option<&str> {
        self.data.ip_type.as_deref()
    }

    /// ISO 3166-1 alpha-2 country code.
    pub fn country_code(&self) -> Option<&str> {
        self.data.country_code.as_deref()
    }

    /// Country name in English.
    pub fn country_name(&self) -> Option<&str> {
        self.data.country_name.as_deref()
    }

    /// Two-letter continent code.
    pub fn continent_code(&self) -> Option<&str> {
        self.data.continent_code.as_deref()
    }

    /// Continent name in English.
    pub fn continent_name(&self) -> Option<&str> {
        self.data.continent_name.as_deref()
    }

    pub fn region_name(&self) -> Option<&str> {
        self.data.region_name.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.data.city.as_deref()
    }

    pub fn zip(&self) -> Option<&str> {
        self.data.zip.as_deref()
    }

    /// `(latitude, longitude)` of the resolved city, if both are known.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.data.latitude?, self.data.longitude?))
    }

    /// Capital city of the country.
    pub fn capital(&self) -> Option<&str> {
        self.details()?.capital.as_deref()
    }

    pub fn calling_code(&self) -> Option<&str> {
        self.details()?.calling_code.as_deref()
    }

    pub fn country_flag_emoji(&self) -> Option<&str> {
        self.details()?.country_flag_emoji.as_deref()
    }

    /// All official languages, in the order returned by the API.
    /// Empty when the list is null or missing.
    pub fn languages(&self) -> &[Language] {
        self.details()
            .and_then(|d| d.languages.as_deref())
            .unwrap_or(&[])
    }

    /// The first official language, or `None` when the API lists none.
    pub fn primary_language(&self) -> Option<&Language> {
        self.languages().first()
    }

    /// Whether the location is inside the European Union.
    /// A null or missing flag counts as outside.
    pub fn is_within_europe(&self) -> bool {
        self.details().and_then(|d| d.is_eu).unwrap_or(false)
    }

    /// Typed view of the response.
    pub fn data(&self) -> &LocationResponse {
        &self.data
    }

    /// The response body exactly as received.
    pub fn raw_location_data(&self) -> &Value {
        &self.raw
    }

    /// Consume the location and return the body as received.
    pub fn into_raw(self) -> Value {
        self.raw
    }
}

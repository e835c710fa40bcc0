use log::{info, warn};
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default base URL of the geolocation service.
pub const DEFAULT_API_BASE: &str = "http://ip-api.com";

/// Wire shape of the service's JSON body. Every field is optional; the
/// service omits fields it has no data for.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    country: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    city: Option<String>,
    #[serde(rename = "countryCode")]
    country_code: Option<String>,
}

/// The normalized result of one geolocation lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationRecord {
    /// The address or domain that was looked up, verbatim.
    pub address: String,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub country_code: Option<String>,
}

impl LocationRecord {
    /// Render the output line for this record, without a trailing newline.
    ///
    /// Returns `None` when `country` is absent: such a lookup counts as
    /// unresolved and no part of the line may be written. Other absent fields
    /// render as empty text.
    pub fn annotation(&self, port: &str) -> Option<String> {
        self.country.as_ref()?;
        Some(format!(
            "{}:{}#{} {}",
            self.address,
            port,
            self.country_code.as_deref().unwrap_or(""),
            self.region.as_deref().unwrap_or("")
        ))
    }
}

/// A geolocation lookup client over the service's `/json/<address>` endpoint.
pub struct Resolver {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl Resolver {
    /// Build a resolver against `base_url`, e.g. `http://ip-api.com`.
    ///
    /// No request timeout is configured beyond the client's own default, and
    /// no connection is attempted until the first lookup.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(Error::Client)?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { client, base_url })
    }

    /// Look up one address or domain, blocking until the service answers.
    ///
    /// Transport failures (DNS, connect, timeout) are logged and reported as
    /// `None`. A non-success status is reported as `None` without a log line.
    /// No retries either way.
    pub fn resolve(&self, address: &str) -> Option<LocationRecord> {
        let url = format!("{}/json/{}", self.base_url, address);

        let response = match self.client.get(&url).send() {
            Ok(response) => response,
            Err(err) => {
                warn!("lookup failed for {address}: {err}");
                return None;
            }
        };

        if !response.status().is_success() {
            return None;
        }

        let body: ApiResponse = match response.json() {
            Ok(body) => body,
            Err(err) => {
                warn!("lookup failed for {address}: {err}");
                return None;
            }
        };

        let record = LocationRecord {
            address: address.to_string(),
            country: body.country,
            region: body.region_name,
            city: body.city,
            country_code: body.country_code,
        };

        info!(
            "{}: {} {} {}",
            record.address,
            record.country_code.as_deref().unwrap_or(""),
            record.region.as_deref().unwrap_or(""),
            record.city.as_deref().unwrap_or("")
        );

        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        country: Option<&str>,
        region: Option<&str>,
        city: Option<&str>,
        country_code: Option<&str>,
    ) -> LocationRecord {
        LocationRecord {
            address: "1.2.3.4".to_string(),
            country: country.map(String::from),
            region: region.map(String::from),
            city: city.map(String::from),
            country_code: country_code.map(String::from),
        }
    }

    #[test]
    fn annotation_formats_resolved_record() {
        let rec = record(
            Some("United States"),
            Some("California"),
            Some("LA"),
            Some("US"),
        );
        assert_eq!(rec.annotation("8080").as_deref(), Some("1.2.3.4:8080#US California"));
    }

    #[test]
    fn annotation_is_absent_without_country() {
        let rec = record(None, Some("California"), Some("LA"), Some("US"));
        assert_eq!(rec.annotation("8080"), None);
    }

    #[test]
    fn annotation_blanks_other_missing_fields() {
        let rec = record(Some("Germany"), None, None, None);
        assert_eq!(rec.annotation("443").as_deref(), Some("1.2.3.4:443# "));
    }

    #[test]
    fn wire_fields_deserialize() {
        let body: ApiResponse = serde_json::from_str(
            r#"{"country":"United States","regionName":"California","city":"LA","countryCode":"US","query":"1.2.3.4"}"#,
        )
        .unwrap();
        assert_eq!(body.country.as_deref(), Some("United States"));
        assert_eq!(body.region_name.as_deref(), Some("California"));
        assert_eq!(body.city.as_deref(), Some("LA"));
        assert_eq!(body.country_code.as_deref(), Some("US"));
    }

    #[test]
    fn wire_missing_fields_are_none() {
        let body: ApiResponse = serde_json::from_str(r#"{"status":"fail"}"#).unwrap();
        assert_eq!(body.country, None);
        assert_eq!(body.region_name, None);
        assert_eq!(body.city, None);
        assert_eq!(body.country_code, None);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let resolver = Resolver::new("http://ip-api.com/").unwrap();
        assert_eq!(resolver.base_url, "http://ip-api.com");
    }
}

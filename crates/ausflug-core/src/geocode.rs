//! Geocoding collaborator: free-text place lookup over HTTP.
//!
//! The engine treats "resolve place name to coordinates" as an opaque,
//! single-result, best-effort external call. Any transport or payload
//! problem degrades to "no match"; the caller leaves the current
//! center unset.

use std::time::Duration;

use serde_json::Value;

use crate::geo::Coordinates;

/// Default endpoint (Nominatim / OpenStreetMap).
pub const DEFAULT_ENDPOINT_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Default timeout for lookup requests.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Configuration for the geocoding endpoint.
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub url: String,
    pub timeout_seconds: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        GeocoderConfig {
            url: DEFAULT_ENDPOINT_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl GeocoderConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("AUSFLUG_GEOCODER_URL") {
            if !url.is_empty() {
                config.url = url;
            }
        }

        if let Ok(timeout) = std::env::var("AUSFLUG_GEOCODER_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.timeout_seconds = seconds.clamp(1, 120);
            }
        }

        config
    }
}

/// HTTP client for place lookups.
pub struct Geocoder {
    config: GeocoderConfig,
    user_agent: String,
}

impl Geocoder {
    pub fn new(config: GeocoderConfig) -> Self {
        let user_agent = format!(
            "ausflug/{} ({})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS
        );
        Geocoder { config, user_agent }
    }

    /// Resolve a place name or postal code to its best-match
    /// coordinates. Returns `None` on no match and on any failure.
    pub fn lookup(&self, query: &str) -> Option<Coordinates> {
        if query.is_empty() {
            return None;
        }

        let response = ureq::get(&self.config.url)
            .query("format", "json")
            .query("q", query)
            .query("limit", "1")
            .set("User-Agent", &self.user_agent)
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .call();

        let body: Value = match response {
            Ok(res) => match res.into_json() {
                Ok(body) => body,
                Err(err) => {
                    tracing::warn!(error = %err, "geocoder returned unreadable payload");
                    return None;
                }
            },
            Err(err) => {
                tracing::warn!(error = %err, "geocoder request failed");
                return None;
            }
        };

        let result = first_match(&body);
        if result.is_none() {
            tracing::debug!(query, "geocoder found no match");
        }
        result
    }
}

impl Default for Geocoder {
    fn default() -> Self {
        Self::new(GeocoderConfig::from_env())
    }
}

/// Extract the first match from a Nominatim response. The endpoint
/// returns `lat`/`lon` as JSON strings.
fn first_match(body: &Value) -> Option<Coordinates> {
    let entry = body.as_array()?.first()?;
    let lat = coordinate_field(entry, "lat")?;
    let lon = coordinate_field(entry, "lon")?;
    Some(Coordinates::new(lat, lon))
}

fn coordinate_field(entry: &Value, name: &str) -> Option<f64> {
    match entry.get(name)? {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

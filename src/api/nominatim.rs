use std::thread;
use std::time::{Duration, Instant};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::GeoPoint;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = "reportmap/0.1.0";

/// Nominatim usage policy allows at most one request per second.
const MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(1);

/// Errors that can occur while resolving an address.
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("address not found: {0}")]
    AddressNotFound(String),

    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Nominatim returned error status: {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed Nominatim response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
}

/// A geocoded address: the resolved coordinate plus the provider's
/// canonical name for the match.
#[derive(Debug, Clone)]
pub struct ResolvedAddress {
    pub location: GeoPoint,
    pub display_name: String,
}

/// Blocking Nominatim client that spaces out its requests.
///
/// Each call sleeps out whatever remains of the minimum interval since
/// the previous request, so resolving several addresses in sequence
/// stays within the provider's rate limit. There is no internal retry;
/// a failed call surfaces immediately.
pub struct Geocoder {
    client: reqwest::blocking::Client,
    last_request: Option<Instant>,
}

impl Geocoder {
    pub fn new() -> Result<Self, GeocodeError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            last_request: None,
        })
    }

    /// Resolve a free-text address to coordinates.
    ///
    /// # Returns
    /// * `Ok(ResolvedAddress)` - best match from Nominatim
    /// * `Err(GeocodeError::AddressNotFound)` - provider had no match
    pub fn geocode(&mut self, address: &str) -> Result<ResolvedAddress, GeocodeError> {
        self.throttle();

        let response = self
            .client
            .get(NOMINATIM_URL)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()?;

        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status()));
        }

        let results: Vec<NominatimResult> = response.json()?;
        let result = results
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::AddressNotFound(address.to_string()))?;

        let lat: f64 = result
            .lat
            .parse()
            .map_err(|_| GeocodeError::MalformedResponse(format!("latitude {:?}", result.lat)))?;
        let lon: f64 = result
            .lon
            .parse()
            .map_err(|_| GeocodeError::MalformedResponse(format!("longitude {:?}", result.lon)))?;

        let location =
            GeoPoint::new(lat, lon).map_err(|e| GeocodeError::MalformedResponse(e.to_string()))?;

        Ok(ResolvedAddress {
            location,
            display_name: result.display_name,
        })
    }

    fn throttle(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < MIN_REQUEST_INTERVAL {
                thread::sleep(MIN_REQUEST_INTERVAL - elapsed);
            }
        }
        self.last_request = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nominatim_response() {
        // Sample response from Nominatim
        let json = r#"[{"lat":"42.3600949","lon":"-71.0589797","display_name":"Boston City Hall, 1, City Hall Square, Boston, Massachusetts, USA"}]"#;
        let results: Vec<NominatimResult> = serde_json::from_str(json).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].lat, "42.3600949");
        assert_eq!(results[0].lon, "-71.0589797");
        assert!(results[0].display_name.starts_with("Boston City Hall"));
    }

    #[test]
    fn test_empty_response_parses() {
        let results: Vec<NominatimResult> = serde_json::from_str("[]").unwrap();
        assert!(results.is_empty());
    }
}

use thiserror::Error;

/// Errors produced when constructing a [`GeoPoint`].
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    #[error("latitude {0} outside valid range -90..90")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside valid range -180..180")]
    LongitudeOutOfRange(f64),
    #[error("coordinate values must be finite")]
    NotFinite,
}

/// A WGS84 coordinate in floating-point degrees.
///
/// Both components are guaranteed finite and within valid geographic
/// ranges; construction is the only way to obtain one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Validate and build a coordinate pair.
    ///
    /// # Arguments
    /// * `lat` - Latitude in degrees, -90..90
    /// * `lon` - Longitude in degrees, -180..180
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

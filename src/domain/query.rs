use thiserror::Error;

use super::geo::GeoPoint;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("search radius must be a positive number of meters, got {0}")]
pub struct InvalidRadiusError(pub f64);

/// A validated search radius in meters, always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRadius(f64);

impl SearchRadius {
    pub fn from_meters(meters: f64) -> Result<Self, InvalidRadiusError> {
        if meters.is_finite() && meters > 0.0 {
            Ok(Self(meters))
        } else {
            Err(InvalidRadiusError(meters))
        }
    }

    pub fn meters(&self) -> f64 {
        self.0
    }
}

/// Origin and radius of a proximity search.
#[derive(Debug, Clone, Copy)]
pub struct SearchQuery {
    pub origin: GeoPoint,
    pub radius: SearchRadius,
}

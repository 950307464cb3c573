use thiserror::Error;

use super::geo::GeoPoint;

/// The source dataset writes (0, 0) when no location was recorded.
const SENTINEL: (f64, f64) = (0.0, 0.0);

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ReportError {
    #[error("location (0, 0) marks an unrecorded position, not a real point")]
    UnrecordedLocation,
}

/// A single geotagged incident report.
///
/// The location is never the (0, 0) sentinel; rows carrying it are
/// rejected at construction rather than filtered later.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    description: String,
    year: i32,
    month: u32,
    day_of_week: String,
    street: String,
    location: GeoPoint,
}

impl Report {
    pub fn new(
        description: String,
        year: i32,
        month: u32,
        day_of_week: String,
        street: String,
        location: GeoPoint,
    ) -> Result<Self, ReportError> {
        if (location.lat(), location.lon()) == SENTINEL {
            return Err(ReportError::UnrecordedLocation);
        }
        Ok(Self {
            description,
            year,
            month,
            day_of_week,
            street,
            location,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day_of_week(&self) -> &str {
        &self.day_of_week
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }
}

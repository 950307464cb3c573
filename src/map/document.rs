use serde::Serialize;

use crate::domain::{GeoPoint, Report, SearchQuery};
use crate::geometry::FilteredReport;

/// One clustered marker on the report map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    /// Label shown when the marker is opened.
    pub popup: String,
    /// Label shown on hover.
    pub tooltip: String,
}

/// In-memory description of the map artifact: a view centered on the
/// search origin, a circle of the search radius, and one clustered
/// marker per surviving report.
#[derive(Debug, Clone)]
pub struct MapDocument {
    center: GeoPoint,
    radius_m: f64,
    markers: Vec<Marker>,
}

impl MapDocument {
    pub fn new(query: &SearchQuery) -> Self {
        Self {
            center: query.origin,
            radius_m: query.radius.meters(),
            markers: Vec::new(),
        }
    }

    /// Build the full document for a filtered selection in one step.
    pub fn from_filtered(query: &SearchQuery, filtered: &FilteredReport) -> Self {
        let mut doc = Self::new(query);
        for report in filtered.iter() {
            doc.add_report(report);
        }
        doc
    }

    pub fn add_report(&mut self, report: &Report) {
        self.markers.push(Marker {
            lat: report.location().lat(),
            lon: report.location().lon(),
            popup: format!(
                "Time: {} {} {}",
                report.day_of_week(),
                report.month(),
                report.year()
            ),
            tooltip: report.description().to_string(),
        });
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn radius_meters(&self) -> f64 {
        self.radius_m
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }
}

use crate::domain::{Report, SearchQuery};

use super::distance::distance_meters;

/// Reports that survived a radius query, in dataset order.
#[derive(Debug, Clone, Default)]
pub struct FilteredReport {
    reports: Vec<Report>,
}

impl FilteredReport {
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Report> {
        self.reports.iter()
    }
}

/// Select the reports within the query radius of its origin.
///
/// Single pass over the input, O(n), no spatial index. The boundary is
/// inclusive: a report exactly at the radius survives. Input order is
/// preserved.
pub fn filter_by_radius(reports: Vec<Report>, query: &SearchQuery) -> FilteredReport {
    let radius = query.radius.meters();
    let reports = reports
        .into_iter()
        .filter(|r| distance_meters(r.location(), query.origin) <= radius)
        .collect();
    FilteredReport { reports }
}

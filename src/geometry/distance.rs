use geo::{Distance, Geodesic, Point};

use crate::domain::GeoPoint;

/// Geodesic distance between two coordinates in meters.
///
/// Computed on the WGS84 ellipsoid rather than with a flat
/// approximation; inputs span city-scale distances where curvature
/// is non-negligible.
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> f64 {
    Geodesic::distance(
        Point::new(a.lon(), a.lat()),
        Point::new(b.lon(), b.lat()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_zero_distance_at_same_point() {
        let p = point(42.3601, -71.0589);
        assert!(distance_meters(p, p).abs() < 1e-6);
    }

    #[test]
    fn test_one_degree_latitude() {
        // One meridian degree at the equator is ~110.57 km on the ellipsoid
        let d = distance_meters(point(0.0, 0.0), point(1.0, 0.0));
        assert!((d - 110_574.0).abs() < 200.0);
    }

    #[test]
    fn test_city_block_scale() {
        // Two points ~14 m apart near Boston City Hall
        let d = distance_meters(point(42.3601, -71.0589), point(42.3602, -71.0590));
        assert!(d > 5.0 && d < 25.0);
    }

    #[test]
    fn test_symmetry() {
        let a = point(42.3601, -71.0589);
        let b = point(42.4000, -71.2000);
        assert!((distance_meters(a, b) - distance_meters(b, a)).abs() < 1e-6);
    }
}

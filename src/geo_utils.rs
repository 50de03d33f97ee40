//! Geographic utilities: great-circle distance, path length, bounds and
//! center computation, line simplification.
//!
//! Every length and error computation downstream of the repair transforms
//! goes through [`haversine_distance`] and [`path_length`], so candidate
//! comparisons are always measured with the same ruler.

use crate::{Bounds, GpsPoint};
use geo::{algorithm::simplify::Simplify, Coord, LineString};

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two GPS points in kilometers.
///
/// Uses the haversine formula on latitude/longitude; elevation is ignored.
///
/// # Example
/// ```
/// use trailmend::GpsPoint;
/// use trailmend::geo_utils::haversine_distance;
///
/// let london = GpsPoint::new(51.5074, -0.1278);
/// let paris = GpsPoint::new(48.8566, 2.3522);
/// let dist = haversine_distance(&london, &paris);
/// assert!((dist - 343.5).abs() < 5.0);
/// ```
pub fn haversine_distance(p1: &GpsPoint, p2: &GpsPoint) -> f64 {
    let lat1 = p1.latitude.to_radians();
    let lat2 = p2.latitude.to_radians();
    let dlat = (p2.latitude - p1.latitude).to_radians();
    let dlng = (p2.longitude - p1.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Total length of a path in kilometers: the sum of consecutive-pair
/// haversine distances. Zero for paths of fewer than 2 points.
pub fn path_length(points: &[GpsPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum()
}

/// Compute the bounding box of a track. Returns zeroed bounds for an
/// empty track.
pub fn compute_bounds(points: &[GpsPoint]) -> Bounds {
    Bounds::from_points(points).unwrap_or(Bounds {
        min_lat: 0.0,
        max_lat: 0.0,
        min_lng: 0.0,
        max_lng: 0.0,
    })
}

/// Compute the centroid (arithmetic mean position) of a set of points.
/// Returns the origin for an empty set.
pub fn compute_center(points: &[GpsPoint]) -> GpsPoint {
    if points.is_empty() {
        return GpsPoint::new(0.0, 0.0);
    }
    let lat_sum: f64 = points.iter().map(|p| p.latitude).sum();
    let lng_sum: f64 = points.iter().map(|p| p.longitude).sum();
    GpsPoint::new(lat_sum / points.len() as f64, lng_sum / points.len() as f64)
}

/// Convert kilometers to an approximate degree span at the given latitude.
///
/// Uses the latitude-degree scale, which is the conservative (larger-area)
/// choice for radius queries in degree space.
pub fn km_to_degrees(km: f64, latitude: f64) -> f64 {
    let km_per_deg = 111.320 * latitude.to_radians().cos().max(0.01);
    km / km_per_deg
}

/// Minimum and maximum elevation over a track, when any point carries one.
pub fn elevation_range(points: &[GpsPoint]) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;
    for p in points {
        if let Some(ele) = p.elevation {
            range = Some(match range {
                Some((lo, hi)) => (lo.min(ele), hi.max(ele)),
                None => (ele, ele),
            });
        }
    }
    range
}

/// Douglas-Peucker line simplification.
///
/// Reduces the number of points in a polyline while preserving shape.
/// Elevation is dropped from the output (the simplified geometry is meant
/// for lightweight display, not for enrichment).
///
/// # Arguments
/// * `points` - Input polyline
/// * `tolerance` - Maximum deviation from the original line in degrees
///   (0.0001 is roughly 11 meters)
pub fn douglas_peucker(points: &[GpsPoint], tolerance: f64) -> Vec<GpsPoint> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let coords: Vec<Coord<f64>> = points
        .iter()
        .map(|p| Coord {
            x: p.longitude,
            y: p.latitude,
        })
        .collect();

    let line = LineString::new(coords);
    let simplified = line.simplify(&tolerance);

    simplified
        .coords()
        .map(|c| GpsPoint::new(c.y, c.x))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_length_degenerate() {
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&[GpsPoint::new(46.0, 8.0)]), 0.0);
    }

    #[test]
    fn test_km_to_degrees_at_equator() {
        let deg = km_to_degrees(111.32, 0.0);
        assert!((deg - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_elevation_range() {
        let points = vec![
            GpsPoint::with_elevation(46.0, 8.0, 1200.0),
            GpsPoint::new(46.01, 8.0),
            GpsPoint::with_elevation(46.02, 8.0, 2400.0),
        ];
        assert_eq!(elevation_range(&points), Some((1200.0, 2400.0)));
        assert_eq!(elevation_range(&[GpsPoint::new(46.0, 8.0)]), None);
    }
}

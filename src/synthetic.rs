//! Synthetic trail generator for tests and demos.
//!
//! Produces clean trail polylines and re-creates the defects the repair
//! engine exists to fix — fragment shuffles, flyback excursions, teleport
//! jumps, duplicated sections, one-way captures — with known ground truth.
//! All randomness is seeded for deterministic reproduction.

use crate::GpsPoint;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

// ============================================================================
// Coordinate Helpers
// ============================================================================

/// Kilometers per degree of latitude (approximately constant).
const KM_PER_DEG_LAT: f64 = 111.320;

/// Convert kilometers to degrees of latitude.
fn km_to_deg_lat(km: f64) -> f64 {
    km / KM_PER_DEG_LAT
}

/// Convert kilometers to degrees of longitude at a given latitude.
fn km_to_deg_lng(km: f64, latitude: f64) -> f64 {
    let km_per_deg_lng = KM_PER_DEG_LAT * latitude.to_radians().cos();
    if km_per_deg_lng.abs() < 1e-10 {
        return 0.0;
    }
    km / km_per_deg_lng
}

// ============================================================================
// Trail Generation
// ============================================================================

/// Generate a straight one-way trail of the given length.
///
/// Points are evenly spaced; heading is in radians from east,
/// counter-clockwise (0 = due east, PI/2 = due north).
pub fn line_trail(
    origin: GpsPoint,
    heading: f64,
    length_km: f64,
    num_points: usize,
) -> Vec<GpsPoint> {
    assert!(num_points >= 2, "a trail needs at least 2 points");

    let step_km = length_km / (num_points - 1) as f64;
    let mut points = Vec::with_capacity(num_points);
    let mut current = origin;
    points.push(current);

    for _ in 1..num_points {
        current = GpsPoint::new(
            current.latitude + km_to_deg_lat(step_km * heading.sin()),
            current.longitude + km_to_deg_lng(step_km * heading.cos(), current.latitude),
        );
        points.push(current);
    }

    points
}

/// Generate a closed loop trail of roughly the given circumference,
/// starting and ending at the same point.
pub fn loop_trail(origin: GpsPoint, circumference_km: f64, num_points: usize) -> Vec<GpsPoint> {
    assert!(num_points >= 3, "a loop needs at least 3 points");

    let radius_km = circumference_km / (2.0 * PI);
    let mut points = Vec::with_capacity(num_points);

    for i in 0..num_points {
        let angle = 2.0 * PI * i as f64 / (num_points - 1) as f64;
        points.push(GpsPoint::new(
            origin.latitude + km_to_deg_lat(radius_km * angle.sin()),
            origin.longitude + km_to_deg_lng(radius_km * (angle.cos() - 1.0), origin.latitude),
        ));
    }

    points
}

// ============================================================================
// Defect Injection
// ============================================================================

/// Cut a trail into `parts` contiguous pieces and reassemble them in a
/// shuffled order, reversing each piece with 50% probability.
///
/// The boundaries between displaced pieces become gap jumps, which is the
/// input shape the chainer repairs.
pub fn split_and_shuffle(points: &[GpsPoint], parts: usize, seed: u64) -> Vec<GpsPoint> {
    assert!(parts >= 2 && points.len() >= parts * 2);

    let mut rng = StdRng::seed_from_u64(seed);
    let piece_len = points.len() / parts;

    let mut pieces: Vec<Vec<GpsPoint>> = Vec::with_capacity(parts);
    for i in 0..parts {
        let start = i * piece_len;
        let end = if i == parts - 1 {
            points.len()
        } else {
            start + piece_len
        };
        pieces.push(points[start..end].to_vec());
    }

    pieces.shuffle(&mut rng);
    for piece in &mut pieces {
        if rng.gen_bool(0.5) {
            piece.reverse();
        }
    }

    pieces.into_iter().flatten().collect()
}

/// Insert a flyback excursion after `at_index`: a short run of points back
/// near the trail origin, offset sideways by `offset_km`.
///
/// The excursion is separated from its neighbors by large jumps, so gap
/// splitting isolates it as its own segment.
pub fn inject_flyback(
    points: &[GpsPoint],
    at_index: usize,
    excursion_points: usize,
    offset_km: f64,
) -> Vec<GpsPoint> {
    assert!(at_index < points.len() && excursion_points <= at_index);

    let excursion: Vec<GpsPoint> = points[..excursion_points]
        .iter()
        .map(|p| GpsPoint::new(p.latitude + km_to_deg_lat(offset_km), p.longitude))
        .collect();

    let mut out = Vec::with_capacity(points.len() + excursion.len());
    out.extend_from_slice(&points[..=at_index]);
    out.extend(excursion);
    out.extend_from_slice(&points[at_index + 1..]);
    out
}

/// Displace every point after `at_index` by `offset_km` northward,
/// creating a single teleport jump mid-trail.
pub fn inject_teleport(points: &[GpsPoint], at_index: usize, offset_km: f64) -> Vec<GpsPoint> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if i > at_index {
                GpsPoint::new(p.latitude + km_to_deg_lat(offset_km), p.longitude)
            } else {
                *p
            }
        })
        .collect()
}

/// Append a duplicate copy of the sub-section `[start, end)` to the end of
/// the trail, the shape left behind by a source that returned an
/// overlapping run twice.
pub fn duplicate_section(points: &[GpsPoint], start: usize, end: usize) -> Vec<GpsPoint> {
    assert!(start < end && end <= points.len());

    let mut out = points.to_vec();
    out.extend_from_slice(&points[start..end]);
    out
}

/// Capture a trail as two directionally-inconsistent halves: the first
/// half reversed, then the second half, both starting near the origin.
pub fn two_half_capture(points: &[GpsPoint]) -> Vec<GpsPoint> {
    let mid = points.len() / 2;
    let mut out: Vec<GpsPoint> = points[..mid].iter().rev().copied().collect();
    out.extend_from_slice(&points[mid..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_utils::{haversine_distance, path_length};

    fn origin() -> GpsPoint {
        GpsPoint::new(46.0, 8.0)
    }

    #[test]
    fn test_line_trail_length() {
        let trail = line_trail(origin(), PI / 2.0, 20.0, 200);
        assert_eq!(trail.len(), 200);
        assert!((path_length(&trail) - 20.0).abs() < 0.1);
    }

    #[test]
    fn test_loop_trail_closes() {
        let trail = loop_trail(origin(), 15.0, 100);
        let gap = haversine_distance(&trail[0], &trail[trail.len() - 1]);
        assert!(gap < 0.01);
        assert!((path_length(&trail) - 15.0).abs() < 1.0);
    }

    #[test]
    fn test_split_and_shuffle_preserves_points() {
        let trail = line_trail(origin(), 0.0, 10.0, 100);
        let shuffled = split_and_shuffle(&trail, 4, 42);
        assert_eq!(shuffled.len(), trail.len());
        // Deterministic for a fixed seed.
        assert_eq!(shuffled, split_and_shuffle(&trail, 4, 42));
    }

    #[test]
    fn test_inject_teleport_adds_jump() {
        let trail = line_trail(origin(), PI / 2.0, 10.0, 50);
        let torn = inject_teleport(&trail, 25, 80.0);
        assert!(path_length(&torn) > path_length(&trail) + 70.0);
    }
}

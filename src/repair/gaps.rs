//! Adaptive gap suppression: cancelling teleport artifacts without
//! discarding points.
//!
//! Instead of removing geometry, suppression changes what counts toward
//! total length: consecutive-point jumps above a threshold are excluded
//! from the sum. The threshold is chosen from a small ladder of candidates
//! by scanning for the lowest error against the reference distance. The
//! "no suppression" case is the caller's baseline, so a suppression result
//! is only adopted when it beats the unsuppressed length.

use crate::geo_utils::haversine_distance;
use crate::repair::relative_error;
use crate::{GpsPoint, RepairConfig};

/// Winning threshold of a suppression scan and the length it yields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Suppression {
    /// Jumps above this threshold were excluded from the length sum
    pub threshold_km: f64,
    /// Resulting path length in kilometers
    pub distance_km: f64,
}

/// Path length counting only consecutive-pair distances at or below
/// `threshold_km`. Zero for paths of fewer than 2 points.
pub fn suppressed_length(points: &[GpsPoint], threshold_km: f64) -> f64 {
    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .filter(|d| *d <= threshold_km)
        .sum()
}

/// Scan the configured threshold ladder and return the suppression with
/// the lowest error against the reference distance.
///
/// Returns `None` for degenerate paths or an empty ladder. The scan keeps
/// the first threshold on ties, so smaller (more aggressive) thresholds
/// win when two produce the same error.
pub fn best_suppression(
    points: &[GpsPoint],
    reference_km: f64,
    config: &RepairConfig,
) -> Option<Suppression> {
    if points.len() < 2 {
        return None;
    }

    let mut best: Option<Suppression> = None;
    let mut best_error = f64::INFINITY;

    for &threshold_km in &config.suppression_ladder_km {
        let distance_km = suppressed_length(points, threshold_km);
        let error = relative_error(distance_km, reference_km);
        if error < best_error {
            best_error = error;
            best = Some(Suppression {
                threshold_km,
                distance_km,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo_utils::path_length;

    /// Straight line north with one ~110 km teleport in the middle;
    /// the small steps sum to roughly 1.8 km.
    fn path_with_teleport() -> Vec<GpsPoint> {
        let mut points: Vec<GpsPoint> = (0..10)
            .map(|i| GpsPoint::new(46.0 + i as f64 * 0.0009, 8.0))
            .collect();
        points.extend((0..10).map(|i| GpsPoint::new(47.0 + i as f64 * 0.0009, 8.0)));
        points
    }

    #[test]
    fn test_suppressed_length_excludes_jump() {
        let points = path_with_teleport();
        let full = path_length(&points);
        let capped = suppressed_length(&points, 2.0);
        // The teleport is excluded, the small steps are not.
        assert!(full > 100.0);
        assert!(capped < 3.0);
    }

    #[test]
    fn test_best_suppression_picks_small_threshold() {
        let points = path_with_teleport();
        // True trail length is the 18 small steps, ~1.8 km.
        let best = best_suppression(&points, 1.8, &RepairConfig::default()).unwrap();
        assert!(best.threshold_km <= 2.0);
        assert!((best.distance_km - 1.8).abs() < 0.3);
    }

    #[test]
    fn test_best_suppression_degenerate() {
        assert!(best_suppression(&[], 10.0, &RepairConfig::default()).is_none());
    }
}

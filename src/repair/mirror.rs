//! Out-and-back synthesis: mirroring a one-way capture of a round trip.
//!
//! A trail walked out to a destination and back again is often captured
//! only one way, so its measured length lands near half the reference
//! distance. The missing return leg is the forward path in reverse.

use crate::geo_utils::{haversine_distance, path_length};
use crate::{GpsPoint, RepairConfig};
use log::debug;

/// Synthesize the return leg of a probable one-way capture.
///
/// Applies only when the computed length is within `mirror_tolerance` of
/// `reference_km / 2` and the start and end are meaningfully separated.
/// The separation guard is `mirror_min_separation_km`, scaled down to
/// `reference_km x mirror_short_trail_fraction` for very short trails;
/// paths that close on themselves are loops, and doubling a loop is
/// always wrong. Known loops are excluded upstream via repair hints.
///
/// The synthesized path is `forward + reverse(forward)` with the
/// duplicated turnaround point dropped.
pub fn mirror_out_and_back(
    points: &[GpsPoint],
    reference_km: f64,
    config: &RepairConfig,
) -> Option<Vec<GpsPoint>> {
    if points.len() < 2 || reference_km <= 0.0 {
        return None;
    }

    let computed = path_length(points);
    let half = reference_km / 2.0;
    if ((computed - half) / half).abs() > config.mirror_tolerance {
        return None;
    }

    let separation = haversine_distance(&points[0], &points[points.len() - 1]);
    let min_separation = config
        .mirror_min_separation_km
        .min(reference_km * config.mirror_short_trail_fraction);
    if separation <= min_separation {
        debug!(
            "mirror: start-end separation {:.2} km below guard {:.2} km, treating as loop",
            separation, min_separation
        );
        return None;
    }

    let mut mirrored = Vec::with_capacity(points.len() * 2 - 1);
    mirrored.extend_from_slice(points);
    mirrored.extend(points.iter().rev().skip(1).copied());

    debug!(
        "mirror: one-way capture at {:.1} km of {:.1} km reference, synthesized return leg",
        computed, reference_km
    );

    Some(mirrored)
}

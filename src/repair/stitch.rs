//! Two-half stitching: resolving a path captured as two directionally
//! ambiguous halves.
//!
//! Map sources commonly return a trail as two separate runs with
//! inconsistent start/end ordering. When the second run starts back near
//! the trail origin, the two runs are two halves with at least one of them
//! flipped; the correct orientation is whichever concatenation best matches
//! the reference distance.

use crate::geo_utils::{haversine_distance, path_length};
use crate::repair::relative_error;
use crate::segments::Segment;
use crate::{GpsPoint, RepairConfig};
use log::debug;

/// Resolve two segments into one continuous path, or report "not
/// stitchable" with `None`.
///
/// - Second segment starts near the **origin** (within
///   `stitch_origin_radius_km` and closer to the origin than to the first
///   segment's end): a direction flip. Three candidate concatenations are
///   measured against the reference distance and the lowest-error one wins:
///   `rev(s1) + s2`, `s2 + rev(s1)`, `s1 + rev(s2)`.
/// - Second segment starts near the first segment's **end**: a plain gap,
///   concatenated as-is.
/// - Anything else is left for other transforms.
pub fn stitch_halves(
    seg1: &Segment,
    seg2: &Segment,
    reference_km: f64,
    config: &RepairConfig,
) -> Option<Vec<GpsPoint>> {
    let origin = seg1.start();
    let gap_to_origin = haversine_distance(&seg2.start(), &origin);
    let gap_to_end = haversine_distance(&seg2.start(), &seg1.end());

    if gap_to_origin < config.stitch_origin_radius_km && gap_to_origin < gap_to_end {
        let rev1 = seg1.reversed();
        let rev2 = seg2.reversed();
        let candidates = [
            (concat(&rev1.points, &seg2.points), "rev(a)+b"),
            (concat(&seg2.points, &rev1.points), "b+rev(a)"),
            (concat(&seg1.points, &rev2.points), "a+rev(b)"),
        ];

        let mut best: Option<Vec<GpsPoint>> = None;
        let mut best_error = f64::INFINITY;
        for (points, orientation) in candidates {
            let error = relative_error(path_length(&points), reference_km);
            debug!("stitch candidate {}: error {:.3}", orientation, error);
            if error < best_error {
                best_error = error;
                best = Some(points);
            }
        }
        return best;
    }

    if gap_to_end < config.stitch_origin_radius_km {
        return Some(concat(&seg1.points, &seg2.points));
    }

    None
}

fn concat(a: &[GpsPoint], b: &[GpsPoint]) -> Vec<GpsPoint> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out
}

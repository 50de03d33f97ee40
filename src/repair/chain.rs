//! Greedy nearest-endpoint segment chaining.
//!
//! Reorders a bag of disjoint segments into one path by repeatedly
//! appending whichever unused segment has an endpoint closest to the end
//! of the chain built so far, reversing the segment when its end rather
//! than its start is the closer endpoint.
//!
//! This is a greedy heuristic, not globally optimal. Source segments are
//! typically near-contiguous trail pieces, so nearest-endpoint linking
//! recovers the true order in practice.

use crate::geo_utils::haversine_distance;
use crate::segments::Segment;
use crate::{GpsPoint, RepairConfig};
use log::debug;

/// Assemble segments into one continuous path.
///
/// Segments below `config.min_segment_points` are ignored. The first
/// surviving segment seeds the chain in its given orientation. Ties are
/// broken by first-encountered order, and within one segment the start
/// endpoint wins over the end endpoint, so results are stable.
///
/// If no unused segment has a finite endpoint distance, chaining stops
/// early and the partial chain is returned; callers measure it like any
/// other candidate.
pub fn chain_segments(segments: &[Segment], config: &RepairConfig) -> Vec<GpsPoint> {
    let pool: Vec<&Segment> = segments
        .iter()
        .filter(|s| s.len() >= config.min_segment_points)
        .collect();

    if pool.is_empty() {
        return Vec::new();
    }

    let mut used = vec![false; pool.len()];
    let mut chain: Vec<GpsPoint> = pool[0].points.clone();
    used[0] = true;
    let mut linked = 1;

    loop {
        let last = chain[chain.len() - 1];

        // Closest unused endpoint to the chain's last point. Strict `<`
        // keeps the earliest candidate on ties.
        let mut best: Option<(usize, bool)> = None;
        let mut best_dist = f64::INFINITY;

        for (i, seg) in pool.iter().enumerate() {
            if used[i] {
                continue;
            }
            let d_start = haversine_distance(&last, &seg.start());
            if d_start < best_dist {
                best_dist = d_start;
                best = Some((i, false));
            }
            let d_end = haversine_distance(&last, &seg.end());
            if d_end < best_dist {
                best_dist = d_end;
                best = Some((i, true));
            }
        }

        match best {
            Some((i, reverse)) if best_dist.is_finite() => {
                used[i] = true;
                linked += 1;
                if reverse {
                    chain.extend(pool[i].points.iter().rev().copied());
                } else {
                    chain.extend(pool[i].points.iter().copied());
                }
            }
            _ => break,
        }
    }

    debug!(
        "chained {}/{} segments into {} points",
        linked,
        pool.len(),
        chain.len()
    );

    chain
}

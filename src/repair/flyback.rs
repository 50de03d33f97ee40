//! Flyback detection: discarding segments that jump backward toward the
//! trail origin instead of continuing forward progress.
//!
//! A flyback typically comes from a source returning a short stray piece
//! of a nearby path, captured out of sequence. The filter is intentionally
//! conservative: a large segment that lies close to the origin is kept,
//! since it may be legitimate geometry (e.g. the near leg of a loop).

use crate::geo_utils::haversine_distance;
use crate::segments::Segment;
use crate::RepairConfig;
use log::debug;

/// Scan ordered segments and drop spurious backtracks.
///
/// The first segment anchors the origin and is always kept. Each later
/// segment is discarded iff both hold, measured against the end of the
/// last accepted segment:
///
/// - its midpoint is closer to the origin than
///   `flyback_origin_ratio` x the progress made so far, and
/// - its own length is below `flyback_length_ratio` x that progress.
///
/// Accepted segments keep their original relative order; discarded
/// segments are dropped outright and never retried.
pub fn drop_flybacks(segments: &[Segment], config: &RepairConfig) -> Vec<Segment> {
    if segments.is_empty() {
        return Vec::new();
    }

    let origin = segments[0].start();
    let mut accepted = vec![segments[0].clone()];
    let mut last_end = segments[0].end();

    for seg in &segments[1..] {
        let progress = haversine_distance(&origin, &last_end);
        let regression = haversine_distance(&origin, &seg.midpoint());
        let is_regressive = regression < config.flyback_origin_ratio * progress;
        let is_small = seg.length_km() < config.flyback_length_ratio * progress;

        if is_regressive && is_small {
            debug!(
                "flyback: dropped segment at index {} ({} points, {:.2} km, midpoint {:.2} km from origin)",
                seg.start_index,
                seg.len(),
                seg.length_km(),
                regression
            );
            continue;
        }

        last_end = seg.end();
        accepted.push(seg.clone());
    }

    accepted
}

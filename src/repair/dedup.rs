//! Duplicate-section elimination.
//!
//! Sources sometimes return overlapping runs of the same physical path,
//! e.g. forward and return legs both captured as "forward". Two variants:
//!
//! - **Window dedup** partitions the path into fixed-size windows and
//!   removes any window whose centroid sits on top of an earlier,
//!   non-adjacent window's centroid.
//! - **Duplicate-leg dedup** works at segment granularity: when several
//!   segments all start back at the origin, they are alternative captures
//!   of the same leg, and only the one yielding the lowest error is kept.

use crate::geo_utils::{compute_center, haversine_distance, km_to_degrees, path_length};
use crate::repair::relative_error;
use crate::segments::Segment;
use crate::{GpsPoint, RepairConfig};
use log::debug;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// A window centroid with its window index for R-tree queries.
#[derive(Debug, Clone, Copy)]
struct IndexedCentroid {
    idx: usize,
    lat: f64,
    lng: f64,
}

impl RTreeObject for IndexedCentroid {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.lat, self.lng])
    }
}

impl PointDistance for IndexedCentroid {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.lat - point[0];
        let dlng = self.lng - point[1];
        dlat * dlat + dlng * dlng
    }
}

/// Remove windows that spatially duplicate an earlier part of the path.
///
/// The path is cut into windows of `dedup_window_points`; for every window
/// pair `(i, j)` with `j > i + 1` whose centroids lie within
/// `dedup_centroid_radius_km`, window `j` is marked and its points removed.
/// Adjacent windows are never compared, so ordinary path continuity
/// survives. Returns `None` when nothing qualifies.
///
/// The candidate search runs in degree space over an R-tree and is
/// confirmed with the haversine distance, so the degree radius only needs
/// to over-cover.
pub fn dedup_windows(points: &[GpsPoint], config: &RepairConfig) -> Option<Vec<GpsPoint>> {
    let window = config.dedup_window_points.max(1);
    let window_count = points.len().div_ceil(window);
    if window_count < 3 {
        return None;
    }

    let centroids: Vec<GpsPoint> = points.chunks(window).map(compute_center).collect();

    let indexed: Vec<IndexedCentroid> = centroids
        .iter()
        .enumerate()
        .map(|(i, c)| IndexedCentroid {
            idx: i,
            lat: c.latitude,
            lng: c.longitude,
        })
        .collect();
    let tree = RTree::bulk_load(indexed);

    let mut remove = vec![false; window_count];
    for (i, centroid) in centroids.iter().enumerate() {
        let radius_deg = km_to_degrees(config.dedup_centroid_radius_km, centroid.latitude);
        for hit in tree.locate_within_distance(
            [centroid.latitude, centroid.longitude],
            radius_deg * radius_deg,
        ) {
            if hit.idx <= i + 1 {
                continue;
            }
            let dist = haversine_distance(centroid, &centroids[hit.idx]);
            if dist < config.dedup_centroid_radius_km {
                remove[hit.idx] = true;
            }
        }
    }

    if !remove.iter().any(|r| *r) {
        return None;
    }

    let kept: Vec<GpsPoint> = points
        .chunks(window)
        .enumerate()
        .filter(|(i, _)| !remove[*i])
        .flat_map(|(_, chunk)| chunk.iter().copied())
        .collect();

    debug!(
        "window dedup: removed {}/{} windows ({} -> {} points)",
        remove.iter().filter(|r| **r).count(),
        window_count,
        points.len(),
        kept.len()
    );

    Some(kept)
}

/// Collapse alternative captures of the starting leg.
///
/// When more than one segment starts within `dedup_origin_radius_km` of
/// the origin, each is tried as the sole survivor (the others dropped,
/// original order preserved) and the arrangement with the lowest error
/// against the reference distance wins. Returns `None` when fewer than
/// two segments start near the origin.
pub fn dedup_duplicate_legs(
    segments: &[Segment],
    reference_km: f64,
    config: &RepairConfig,
) -> Option<Vec<GpsPoint>> {
    if segments.len() < 2 {
        return None;
    }

    let origin = segments[0].start();
    let near_origin: Vec<usize> = segments
        .iter()
        .enumerate()
        .filter(|(_, s)| {
            haversine_distance(&origin, &s.start()) < config.dedup_origin_radius_km
        })
        .map(|(i, _)| i)
        .collect();

    if near_origin.len() < 2 {
        return None;
    }

    let mut best: Option<Vec<GpsPoint>> = None;
    let mut best_error = f64::INFINITY;

    for &keep in &near_origin {
        let candidate: Vec<GpsPoint> = segments
            .iter()
            .enumerate()
            .filter(|(i, _)| *i == keep || !near_origin.contains(i))
            .flat_map(|(_, s)| s.points.iter().copied())
            .collect();
        let error = relative_error(path_length(&candidate), reference_km);
        if error < best_error {
            best_error = error;
            best = Some(candidate);
        }
    }

    debug!(
        "leg dedup: {} segments start near the origin, best error {:.3}",
        near_origin.len(),
        best_error
    );

    best
}

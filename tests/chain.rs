//! Tests for greedy nearest-endpoint chaining

use std::f64::consts::FRAC_PI_2;
use trailmend::geo_utils::path_length;
use trailmend::repair::chain_segments;
use trailmend::synthetic::line_trail;
use trailmend::{split_at_gaps, GpsPoint, RepairConfig};

fn origin() -> GpsPoint {
    GpsPoint::new(46.0, 8.0)
}

/// Cut a 20 km line into four pieces and reassemble them out of order,
/// keeping the first piece in place so chaining has a true starting point:
/// [p0, rev(p3), p2, rev(p1)].
fn shuffled_line() -> (Vec<GpsPoint>, f64) {
    let clean = line_trail(origin(), FRAC_PI_2, 20.0, 100);
    let true_length = path_length(&clean);

    let mut disordered: Vec<GpsPoint> = Vec::with_capacity(clean.len());
    disordered.extend_from_slice(&clean[0..25]);
    disordered.extend(clean[75..100].iter().rev());
    disordered.extend_from_slice(&clean[50..75]);
    disordered.extend(clean[25..50].iter().rev());

    (disordered, true_length)
}

#[test]
fn test_chain_reconstructs_shuffled_line() {
    let (disordered, true_length) = shuffled_line();

    let segments = split_at_gaps(&disordered, 2.0);
    assert_eq!(segments.len(), 4);

    let chained = chain_segments(&segments, &RepairConfig::default());
    assert_eq!(chained.len(), disordered.len());
    assert!(
        (path_length(&chained) - true_length).abs() < 0.5,
        "chained length {:.2} vs true {:.2}",
        path_length(&chained),
        true_length
    );
}

#[test]
fn test_chain_ignores_degenerate_segments() {
    let (disordered, _) = shuffled_line();
    let mut segments = split_at_gaps(&disordered, 2.0);

    // A 2-point fragment 200 km away must not participate.
    let stray = line_trail(GpsPoint::new(48.0, 8.0), FRAC_PI_2, 0.1, 2);
    segments.push(trailmend::Segment {
        points: stray,
        start_index: disordered.len(),
    });

    let chained = chain_segments(&segments, &RepairConfig::default());
    assert_eq!(chained.len(), disordered.len());
}

#[test]
fn test_chain_empty_input() {
    let chained = chain_segments(&[], &RepairConfig::default());
    assert!(chained.is_empty());
}

#[test]
fn test_chain_single_segment_is_identity() {
    let clean = line_trail(origin(), FRAC_PI_2, 5.0, 20);
    let segments = split_at_gaps(&clean, 2.0);
    let chained = chain_segments(&segments, &RepairConfig::default());
    assert_eq!(chained, clean);
}

//! Tests for segment extraction

use trailmend::segments::concat_segments;
use trailmend::synthetic::{inject_teleport, line_trail};
use trailmend::{split_at_gaps, GpsPoint};

fn origin() -> GpsPoint {
    GpsPoint::new(46.0, 8.0)
}

#[test]
fn test_split_no_gaps_single_segment() {
    let path = line_trail(origin(), std::f64::consts::FRAC_PI_2, 10.0, 50);
    let segments = split_at_gaps(&path, 2.0);
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].len(), 50);
    assert_eq!(segments[0].start_index, 0);
}

#[test]
fn test_split_at_teleport() {
    let path = inject_teleport(
        &line_trail(origin(), std::f64::consts::FRAC_PI_2, 10.0, 50),
        24,
        80.0,
    );
    let segments = split_at_gaps(&path, 2.0);
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].len(), 25);
    assert_eq!(segments[1].start_index, 25);
}

#[test]
fn test_split_round_trip_reconstructs_exactly() {
    // Concatenating the segments in order must reproduce the input for
    // any threshold.
    let path = inject_teleport(
        &line_trail(origin(), std::f64::consts::FRAC_PI_2, 20.0, 100),
        60,
        30.0,
    );

    for threshold in [0.05, 0.5, 2.0, 50.0] {
        let segments = split_at_gaps(&path, threshold);
        assert_eq!(concat_segments(&segments), path, "threshold {}", threshold);
    }
}

#[test]
fn test_segment_accessors() {
    let path = line_trail(origin(), std::f64::consts::FRAC_PI_2, 10.0, 11);
    let segments = split_at_gaps(&path, 2.0);
    let seg = &segments[0];

    assert_eq!(seg.start(), path[0]);
    assert_eq!(seg.end(), path[10]);
    assert_eq!(seg.midpoint(), path[5]);
    assert!((seg.length_km() - 10.0).abs() < 0.1);

    let rev = seg.reversed();
    assert_eq!(rev.start(), seg.end());
    assert_eq!(rev.end(), seg.start());
    assert!((rev.length_km() - seg.length_km()).abs() < 1e-9);
}

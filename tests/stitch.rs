//! Tests for two-half stitching

use std::f64::consts::FRAC_PI_2;
use trailmend::geo_utils::path_length;
use trailmend::repair::stitch_halves;
use trailmend::synthetic::{line_trail, two_half_capture};
use trailmend::{split_at_gaps, GpsPoint, RepairConfig};

fn origin() -> GpsPoint {
    GpsPoint::new(46.0, 8.0)
}

#[test]
fn test_stitch_reversed_first_half() {
    // Captured as [rev(first half), second half]: the second segment
    // starts back near the origin, so one half needs flipping.
    let clean = line_trail(origin(), FRAC_PI_2, 20.0, 100);
    let reference_km = path_length(&clean);
    let raw = two_half_capture(&clean);

    let config = RepairConfig::default();
    let segments = split_at_gaps(&raw, config.gap_threshold_km);
    assert_eq!(segments.len(), 2);

    let stitched = stitch_halves(&segments[0], &segments[1], reference_km, &config)
        .expect("two halves should stitch");

    assert_eq!(stitched.len(), raw.len());
    assert!(
        (path_length(&stitched) - reference_km).abs() / reference_km < 0.05,
        "stitched length {:.2} vs reference {:.2}",
        path_length(&stitched),
        reference_km
    );
}

#[test]
fn test_stitch_plain_gap_concatenates_as_is() {
    // The second segment starts near the first segment's end: a simple
    // gap, no direction flip.
    let first = line_trail(origin(), FRAC_PI_2, 10.0, 50);
    let second_start = GpsPoint::new(46.12, 8.0); // ~3.3 km past first's end
    let second = line_trail(second_start, FRAC_PI_2, 10.0, 50);

    let mut raw = first.clone();
    raw.extend_from_slice(&second);

    let config = RepairConfig::default();
    let segments = split_at_gaps(&raw, config.gap_threshold_km);
    assert_eq!(segments.len(), 2);

    let stitched = stitch_halves(&segments[0], &segments[1], 23.0, &config)
        .expect("plain gap should stitch");
    assert_eq!(stitched, raw);
}

#[test]
fn test_stitch_unrelated_segments_rejected() {
    let first = line_trail(origin(), FRAC_PI_2, 10.0, 50);
    let far = line_trail(GpsPoint::new(47.0, 9.0), FRAC_PI_2, 10.0, 50);

    let mut raw = first.clone();
    raw.extend_from_slice(&far);

    let config = RepairConfig::default();
    let segments = split_at_gaps(&raw, config.gap_threshold_km);
    assert_eq!(segments.len(), 2);

    assert!(stitch_halves(&segments[0], &segments[1], 20.0, &config).is_none());
}

//! Tests for duplicate-section elimination

use std::f64::consts::FRAC_PI_2;
use trailmend::geo_utils::path_length;
use trailmend::repair::{dedup_duplicate_legs, dedup_windows};
use trailmend::synthetic::{duplicate_section, line_trail};
use trailmend::{split_at_gaps, GpsPoint, RepairConfig};

fn origin() -> GpsPoint {
    GpsPoint::new(46.0, 8.0)
}

#[test]
fn test_window_dedup_removes_repeated_section() {
    // A 20 km line with an interior quarter captured twice: the appended
    // copy duplicates windows of the original and is removed wholesale.
    let clean = line_trail(origin(), FRAC_PI_2, 20.0, 400);
    let polluted = duplicate_section(&clean, 100, 200);
    assert_eq!(polluted.len(), 500);

    let deduped =
        dedup_windows(&polluted, &RepairConfig::default()).expect("duplicate should be found");
    assert_eq!(deduped, clean);
}

#[test]
fn test_window_dedup_clean_path_untouched() {
    let clean = line_trail(origin(), FRAC_PI_2, 20.0, 400);
    assert!(dedup_windows(&clean, &RepairConfig::default()).is_none());
}

#[test]
fn test_window_dedup_too_few_windows() {
    // Fewer than three windows means no non-adjacent pair exists.
    let short = line_trail(origin(), FRAC_PI_2, 5.0, 80);
    assert!(dedup_windows(&short, &RepairConfig::default()).is_none());
}

#[test]
fn test_duplicate_leg_keeps_best_capture() {
    // Two alternative captures of the same starting leg, both starting
    // at the origin; the one matching the reference distance survives.
    let leg = line_trail(origin(), FRAC_PI_2, 10.0, 50);
    let alt = line_trail(GpsPoint::new(46.0, 8.003), FRAC_PI_2, 10.0, 50);

    let mut raw = leg.clone();
    raw.extend_from_slice(&alt);

    let config = RepairConfig::default();
    let segments = split_at_gaps(&raw, config.gap_threshold_km);
    assert_eq!(segments.len(), 2);

    let reference_km = path_length(&leg);
    let deduped = dedup_duplicate_legs(&segments, reference_km, &config)
        .expect("both legs start at the origin");
    assert_eq!(deduped, leg);
}

#[test]
fn test_duplicate_leg_requires_two_near_origin() {
    // Second segment starts far from the origin: nothing to collapse.
    let first = line_trail(origin(), FRAC_PI_2, 10.0, 50);
    let second = line_trail(GpsPoint::new(46.12, 8.0), FRAC_PI_2, 10.0, 50);

    let mut raw = first.clone();
    raw.extend_from_slice(&second);

    let config = RepairConfig::default();
    let segments = split_at_gaps(&raw, config.gap_threshold_km);
    assert_eq!(segments.len(), 2);

    assert!(dedup_duplicate_legs(&segments, 20.0, &config).is_none());
}

//! # Repair Orchestrator
//!
//! Applies the repair transforms to a raw trail and keeps the best result.
//!
//! This is not a linear pipeline. Every transform produces a *candidate*
//! path, every candidate is measured with the same distance model against
//! the reference distance, and the global minimum-error candidate wins —
//! accepted only when it strictly reduces the error of the raw input.
//! A transform that cannot apply (wrong segment count, no qualifying gap,
//! no duplicate found) simply contributes no candidate; nothing in here
//! can fail.
//!
//! ## Candidate pool
//!
//! Segment-level bases are built first (extraction is always the opening
//! move, since segments are the working unit):
//!
//! - flyback-filtered concatenation
//! - greedy nearest-endpoint chain
//! - stitched halves (exactly two segments)
//! - duplicate-leg removal
//!
//! Window dedup and out-and-back mirroring are then layered over every
//! base, including the untouched original, covering the pairwise
//! combinations that sequential greedy application would miss. Gap
//! suppression runs last against the winning point set; it never changes
//! point membership, only the length computation.

pub mod chain;
pub mod dedup;
pub mod flyback;
pub mod gaps;
pub mod mirror;
pub mod stitch;

pub use chain::chain_segments;
pub use dedup::{dedup_duplicate_legs, dedup_windows};
pub use flyback::drop_flybacks;
pub use gaps::{best_suppression, suppressed_length, Suppression};
pub use mirror::mirror_out_and_back;
pub use stitch::stitch_halves;

use crate::geo_utils::path_length;
use crate::hints::RepairHints;
#[cfg(feature = "parallel")]
use crate::hints::HintTable;
use crate::segments::{concat_segments, split_at_gaps};
use crate::{GpsPoint, QualityClass, RawTrail, RepairConfig, RepairedTrail};
use log::{debug, info};

/// Relative error of a computed length against the reference distance.
///
/// Returns infinity for a non-positive reference, which classifies as
/// `HIGH` and rejects every transform (there is nothing to judge against).
pub fn relative_error(computed_km: f64, reference_km: f64) -> f64 {
    if reference_km <= 0.0 {
        return f64::INFINITY;
    }
    (computed_km - reference_km).abs() / reference_km
}

/// A candidate path with the transforms that produced it.
struct Candidate {
    points: Vec<GpsPoint>,
    applied: Vec<String>,
    error: f64,
}

impl Candidate {
    fn new(points: Vec<GpsPoint>, applied: Vec<String>, reference_km: f64) -> Self {
        let error = relative_error(path_length(&points), reference_km);
        Self {
            points,
            applied,
            error,
        }
    }
}

/// Repair a raw point sequence against a reference distance.
///
/// Always returns a result: at minimum the unmodified input with its
/// classification. Paths of fewer than 2 points have zero length and
/// classify `HIGH` without any transform being attempted.
///
/// Re-running repair on an already-repaired path is a no-op: no candidate
/// can strictly improve on a path whose error is already minimal, and the
/// improvement gate rejects ties.
pub fn repair_path(
    points: &[GpsPoint],
    reference_km: f64,
    config: &RepairConfig,
    hints: Option<&RepairHints>,
) -> RepairedTrail {
    if points.len() < 2 {
        let error = relative_error(0.0, reference_km);
        return RepairedTrail {
            points: points.to_vec(),
            computed_km: 0.0,
            error,
            quality: QualityClass::High,
            applied: Vec::new(),
            gap_cap_km: None,
        };
    }

    let gap_km = hints
        .and_then(|h| h.gap_threshold_km)
        .unwrap_or(config.gap_threshold_km);
    let allow_mirror = !hints.is_some_and(|h| h.skip_mirror || h.known_loop);

    // Segment-level bases. The original is base 0 and the fallback winner.
    let mut bases = vec![Candidate::new(points.to_vec(), Vec::new(), reference_km)];
    let original_error = bases[0].error;

    let segments = split_at_gaps(points, gap_km);
    if segments.len() > 1 {
        debug!(
            "split into {} segments at {:.1} km gap threshold",
            segments.len(),
            gap_km
        );

        let kept = drop_flybacks(&segments, config);
        if kept.len() < segments.len() {
            let dropped = segments.len() - kept.len();
            bases.push(Candidate::new(
                concat_segments(&kept),
                vec![format!(
                    "dropped {} flyback segment{}",
                    dropped,
                    if dropped == 1 { "" } else { "s" }
                )],
                reference_km,
            ));
        }

        let chained = chain_segments(&segments, config);
        if chained.len() >= 2 {
            bases.push(Candidate::new(
                chained,
                vec![format!(
                    "chained {} segments by nearest endpoint",
                    segments.len()
                )],
                reference_km,
            ));
        }

        if segments.len() == 2 {
            if let Some(stitched) =
                stitch_halves(&segments[0], &segments[1], reference_km, config)
            {
                bases.push(Candidate::new(
                    stitched,
                    vec!["stitched two halves".to_string()],
                    reference_km,
                ));
            }
        }

        if let Some(deduped) = dedup_duplicate_legs(&segments, reference_km, config) {
            bases.push(Candidate::new(
                deduped,
                vec!["removed duplicate leg near origin".to_string()],
                reference_km,
            ));
        }
    }

    // Layer window dedup and mirroring over every base, covering the
    // pairwise combinations.
    let mut pool: Vec<Candidate> = Vec::new();
    for base in &bases {
        if let Some(windowed) = dedup_windows(&base.points, config) {
            let mut applied = base.applied.clone();
            applied.push("removed duplicate windows".to_string());
            let deduped = Candidate::new(windowed, applied, reference_km);
            if allow_mirror {
                if let Some(mirrored) =
                    mirror_out_and_back(&deduped.points, reference_km, config)
                {
                    let mut applied = deduped.applied.clone();
                    applied.push("mirrored out-and-back".to_string());
                    pool.push(Candidate::new(mirrored, applied, reference_km));
                }
            }
            pool.push(deduped);
        }
        if allow_mirror {
            if let Some(mirrored) = mirror_out_and_back(&base.points, reference_km, config) {
                let mut applied = base.applied.clone();
                applied.push("mirrored out-and-back".to_string());
                pool.push(Candidate::new(mirrored, applied, reference_km));
            }
        }
    }
    pool.extend(bases.drain(1..));
    let original = bases.pop().unwrap_or_else(|| {
        Candidate::new(points.to_vec(), Vec::new(), reference_km)
    });

    debug!(
        "{} candidates, raw error {:.3}",
        pool.len() + 1,
        original_error
    );

    // Global minimum, accepted only if strictly below the raw error.
    let mut winner_idx = None;
    let mut winner_error = original_error;
    for (i, candidate) in pool.iter().enumerate() {
        if candidate.error < winner_error {
            winner_error = candidate.error;
            winner_idx = Some(i);
        }
    }
    let winner = match winner_idx {
        Some(i) => pool.swap_remove(i),
        None => original,
    };

    // Gap suppression last, against the winning point set. It changes the
    // length computation, never the points, so it composes with any winner.
    let mut applied = winner.applied;
    let mut computed_km = path_length(&winner.points);
    let mut error = relative_error(computed_km, reference_km);
    let mut gap_cap_km = None;

    if let Some(suppression) = best_suppression(&winner.points, reference_km, config) {
        let suppressed_error = relative_error(suppression.distance_km, reference_km);
        if suppressed_error < error {
            computed_km = suppression.distance_km;
            error = suppressed_error;
            gap_cap_km = Some(suppression.threshold_km);
            applied.push(format!(
                "suppressed jumps over {} km",
                suppression.threshold_km
            ));
        }
    }

    RepairedTrail {
        points: winner.points,
        computed_km,
        error,
        quality: QualityClass::classify(error),
        applied,
        gap_cap_km,
    }
}

/// Repair one trail, logging the outcome under its id.
pub fn repair_trail(
    trail: &RawTrail,
    config: &RepairConfig,
    hints: Option<&RepairHints>,
) -> RepairedTrail {
    let repaired = repair_path(&trail.points, trail.reference_km, config, hints);

    if repaired.applied.is_empty() {
        info!(
            "{}: {:.1} km vs {:.1} km reference, {:.1}% error ({}), no improving transform",
            trail.id,
            repaired.computed_km,
            trail.reference_km,
            repaired.error_percent(),
            repaired.quality
        );
    } else {
        info!(
            "{}: {:.1} km vs {:.1} km reference, {:.1}% error ({}) after: {}",
            trail.id,
            repaired.computed_km,
            trail.reference_km,
            repaired.error_percent(),
            repaired.quality,
            repaired.applied.join(", ")
        );
    }

    repaired
}

/// Repair many trails in parallel.
///
/// Trails are independent and the repair core is pure, so batch repair
/// parallelizes trivially across trails.
#[cfg(feature = "parallel")]
pub fn repair_batch(
    trails: &[RawTrail],
    config: &RepairConfig,
    hints: &HintTable,
) -> Vec<RepairedTrail> {
    use rayon::prelude::*;

    trails
        .par_iter()
        .map(|trail| repair_trail(trail, config, hints.get(&trail.id)))
        .collect()
}

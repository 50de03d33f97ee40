//! # Trailmend
//!
//! Repair engine for crowd-sourced GPS trail geometry.
//!
//! Raw trail geometry harvested from map relations, GIS layers and uploaded
//! tracks is frequently broken: split into unordered fragments, duplicated in
//! both directions, missing the return leg of an out-and-back, polluted with
//! nearby paths, or torn by teleport jumps. This library repairs such
//! geometry into a single continuous polyline whose measured length matches
//! an independently known reference distance.
//!
//! This library provides:
//! - Gap-based segment extraction and greedy nearest-endpoint chaining
//! - Flyback (spurious backtrack) detection and removal
//! - Two-half stitching for directionally-ambiguous captures
//! - Adaptive gap suppression to cancel teleport artifacts
//! - Duplicate-section elimination by centroid proximity
//! - Out-and-back synthesis for one-way captures of round trips
//! - An orchestrator that accepts a transform only when it reduces the
//!   error against the reference distance
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel batch repair with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use trailmend::{GpsPoint, RawTrail, RepairConfig, repair_trail};
//!
//! let points = vec![
//!     GpsPoint::new(46.6000, 8.0000),
//!     GpsPoint::new(46.6090, 8.0000),
//!     GpsPoint::new(46.6180, 8.0000),
//! ];
//!
//! let trail = RawTrail::new("grindelwald-first", "First Panorama", points, 2.0);
//! let repaired = repair_trail(&trail, &RepairConfig::default(), None);
//!
//! println!(
//!     "{}: {:.1} km, {:.1}% off reference ({})",
//!     trail.name,
//!     repaired.computed_km,
//!     repaired.error_percent(),
//!     repaired.quality
//! );
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{OptionExt, Result, TrailMendError};

// Geographic utilities (distance, length, bounds, simplification)
pub mod geo_utils;

// Segment extraction (gap splitting)
pub mod segments;
pub use segments::{split_at_gaps, Segment};

// Repair transforms and orchestrator
pub mod repair;
#[cfg(feature = "parallel")]
pub use repair::repair_batch;
pub use repair::{relative_error, repair_path, repair_trail};

// Per-trail repair hints (declarative overrides)
pub mod hints;
pub use hints::{HintTable, RepairHints};

// Persisted record and manifest shapes
pub mod catalog;
pub use catalog::{ManifestEntry, TrailRecord};

// Synthetic trail generator for tests and demos
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate with latitude, longitude and optional elevation.
///
/// Elevation is carried through every transform but never consulted by
/// repair decisions; distances are purely horizontal.
///
/// # Example
/// ```
/// use trailmend::GpsPoint;
/// let point = GpsPoint::new(46.5583, 7.9822); // Eiger north face
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in meters (absent when the source carried none)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl GpsPoint {
    /// Create a new GPS point without elevation.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
        }
    }

    /// Create a new GPS point with elevation.
    pub fn with_elevation(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: Some(elevation),
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Bounding box for a trail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from GPS points.
    pub fn from_points(points: &[GpsPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> GpsPoint {
        GpsPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// A raw trail as delivered by a fetch collaborator: ordered points plus the
/// externally known reference distance.
///
/// The id and name are used only for hints lookup and reporting; the repair
/// engine itself never interprets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTrail {
    /// Stable identifier (e.g. "gr20", "via-alpina-1")
    pub id: String,
    /// Display name
    pub name: String,
    /// Ordered GPS points, possibly fragmented or disordered
    pub points: Vec<GpsPoint>,
    /// Officially published trail length in kilometers
    pub reference_km: f64,
}

impl RawTrail {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        points: Vec<GpsPoint>,
        reference_km: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            points,
            reference_km,
        }
    }

    /// Boundary validation for fetch collaborators.
    ///
    /// The repair core itself never fails on bad input (a degenerate
    /// trail just classifies `HIGH`); this check lets a caller reject
    /// obviously broken deliveries before repair.
    pub fn validate(&self) -> Result<()> {
        if self.points.len() < 2 {
            return Err(TrailMendError::InsufficientPoints {
                trail_id: self.id.clone(),
                point_count: self.points.len(),
                minimum_required: 2,
            });
        }
        if let Some(bad) = self.points.iter().find(|p| !p.is_valid()) {
            return Err(TrailMendError::InvalidCoordinates {
                trail_id: self.id.clone(),
                message: format!("({}, {})", bad.latitude, bad.longitude),
            });
        }
        if !self.reference_km.is_finite() || self.reference_km <= 0.0 {
            return Err(TrailMendError::InvalidReference {
                trail_id: self.id.clone(),
                reference_km: self.reference_km,
            });
        }
        Ok(())
    }
}

/// Configuration for the repair transforms.
///
/// All heuristic constants live here rather than in the algorithm bodies so
/// they can be tuned and tested independently. The defaults were validated
/// against long-distance hiking trails; very dense urban geometry may want
/// a smaller gap threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairConfig {
    /// Distance between consecutive points beyond which the path is split
    /// into separate segments. Default: 2.0 km
    pub gap_threshold_km: f64,

    /// Segments with fewer points than this are ignored by transforms that
    /// need non-trivial segments (chaining, stitching). Default: 3
    pub min_segment_points: usize,

    /// A segment is regressive when its midpoint is closer to the origin
    /// than this fraction of the progress made so far. Default: 0.5
    pub flyback_origin_ratio: f64,

    /// A regressive segment is only discarded when its own length is below
    /// this fraction of the progress made so far. Default: 0.3
    pub flyback_length_ratio: f64,

    /// Radius around the origin within which the second segment's start
    /// counts as a direction flip rather than a plain gap. Default: 5.0 km
    pub stitch_origin_radius_km: f64,

    /// Candidate thresholds for adaptive gap suppression, scanned in order.
    /// Default: 0.5, 1, 2, 5, 10, 20, 50 km
    pub suppression_ladder_km: Vec<f64>,

    /// Window size in points for duplicate-section detection. Default: 50
    pub dedup_window_points: usize,

    /// Two windows are duplicates when their centroids are within this
    /// radius. Default: 1.0 km
    pub dedup_centroid_radius_km: f64,

    /// Segments starting within this radius of the origin are candidate
    /// duplicate legs. Default: 1.0 km
    pub dedup_origin_radius_km: f64,

    /// Relative tolerance around reference/2 for detecting a one-way
    /// capture of an out-and-back trail. Default: 0.2
    pub mirror_tolerance: f64,

    /// Minimum start-end separation required before mirroring; paths that
    /// nearly close on themselves are loops. Default: 1.0 km
    pub mirror_min_separation_km: f64,

    /// For short trails the separation guard shrinks to this fraction of
    /// the reference distance. Default: 0.05
    pub mirror_short_trail_fraction: f64,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            gap_threshold_km: 2.0,
            min_segment_points: 3,
            flyback_origin_ratio: 0.5,
            flyback_length_ratio: 0.3,
            stitch_origin_radius_km: 5.0,
            suppression_ladder_km: vec![0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0],
            dedup_window_points: 50,
            dedup_centroid_radius_km: 1.0,
            dedup_origin_radius_km: 1.0,
            mirror_tolerance: 0.2,
            mirror_min_separation_km: 1.0,
            mirror_short_trail_fraction: 0.05,
        }
    }
}

/// How closely a repaired trail's computed length matches the reference
/// distance. Reporting label only; no transform consumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityClass {
    /// Error below 5%
    Ok,
    /// Error below 25%
    Fair,
    /// Error at or above 25%; the trail needs a different data source
    High,
}

impl QualityClass {
    /// Classify a relative error fraction.
    ///
    /// Boundaries are exclusive: an error of exactly 0.05 is `Fair`, and
    /// exactly 0.25 is `High`.
    pub fn classify(error: f64) -> Self {
        if error < 0.05 {
            QualityClass::Ok
        } else if error < 0.25 {
            QualityClass::Fair
        } else {
            QualityClass::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityClass::Ok => "OK",
            QualityClass::Fair => "FAIR",
            QualityClass::High => "HIGH",
        }
    }
}

impl std::fmt::Display for QualityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The terminal state of one repair run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairedTrail {
    /// Corrected point sequence
    pub points: Vec<GpsPoint>,
    /// Computed length in kilometers. When gap suppression was accepted
    /// this is the suppressed length, which is shorter than the plain
    /// sum over `points`.
    pub computed_km: f64,
    /// Relative error against the reference distance (fraction)
    pub error: f64,
    /// Quality classification of the final error
    pub quality: QualityClass,
    /// Human-readable descriptions of the accepted transforms, in
    /// application order. Audit/reporting only.
    pub applied: Vec<String>,
    /// Gap-suppression cap in kilometers, when suppression was accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap_cap_km: Option<f64>,
}

impl RepairedTrail {
    /// Relative error as a percentage.
    pub fn error_percent(&self) -> f64 {
        self.error * 100.0
    }
}

//! Persisted record and manifest shapes.
//!
//! The repair core hands its output to a persistence collaborator in two
//! granularities: a full [`TrailRecord`] per trail carrying the corrected
//! coordinate sequence, and a lightweight [`ManifestEntry`] for catalog
//! listings that must not load full geometry.

use crate::error::{Result, TrailMendError};
use crate::geo_utils::elevation_range;
use crate::{GpsPoint, QualityClass, RepairedTrail};
use serde::{Deserialize, Serialize};

/// The full persisted shape of one repaired trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailRecord {
    /// Stable identifier (e.g. "gr20")
    pub id: String,
    /// Display name
    pub name: String,
    /// Region or range (e.g. "Corsica")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// ISO country code or name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Officially published distance in kilometers
    pub official_distance_km: f64,
    /// Whether the trail is typically walked over multiple days
    #[serde(default)]
    pub multi_day: bool,
    /// Corrected coordinate sequence
    pub points: Vec<GpsPoint>,
    /// Provenance tag of the geometry source (e.g. "osm-relation",
    /// "gis-layer", "user-upload")
    pub source: String,
    /// Computed length of the corrected sequence in kilometers
    pub computed_distance_km: f64,
}

/// One line of the catalog manifest: everything a listing needs, without
/// the coordinate sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub id: String,
    pub name: String,
    /// Number of points in the corrected sequence
    pub point_count: usize,
    /// Provenance tag, copied from the record
    pub source: String,
    /// Minimum elevation in meters, when any point carries elevation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_min: Option<f64>,
    /// Maximum elevation in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_max: Option<f64>,
    pub computed_distance_km: f64,
    /// Quality classification of the repair
    pub quality: QualityClass,
}

impl TrailRecord {
    /// Build a record from a repair outcome plus catalog metadata.
    #[allow(clippy::too_many_arguments)]
    pub fn from_repair(
        id: impl Into<String>,
        name: impl Into<String>,
        region: Option<String>,
        country: Option<String>,
        official_distance_km: f64,
        multi_day: bool,
        source: impl Into<String>,
        repaired: &RepairedTrail,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            region,
            country,
            official_distance_km,
            multi_day,
            points: repaired.points.clone(),
            source: source.into(),
            computed_distance_km: repaired.computed_km,
        }
    }
}

impl TrailRecord {
    /// Serialize this record to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| TrailMendError::CatalogError {
            message: e.to_string(),
        })
    }

    /// Parse a record from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TrailMendError::CatalogError {
            message: e.to_string(),
        })
    }
}

impl ManifestEntry {
    /// Derive a manifest entry from a full record.
    pub fn from_record(record: &TrailRecord, quality: QualityClass) -> Self {
        let range = elevation_range(&record.points);
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            point_count: record.points.len(),
            source: record.source.clone(),
            elevation_min: range.map(|(lo, _)| lo),
            elevation_max: range.map(|(_, hi)| hi),
            computed_distance_km: record.computed_distance_km,
            quality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_entry_from_record() {
        let record = TrailRecord {
            id: "gr20".to_string(),
            name: "GR 20".to_string(),
            region: Some("Corsica".to_string()),
            country: Some("FR".to_string()),
            official_distance_km: 180.0,
            multi_day: true,
            points: vec![
                GpsPoint::with_elevation(42.45, 8.90, 450.0),
                GpsPoint::with_elevation(42.44, 8.91, 1200.0),
            ],
            source: "osm-relation".to_string(),
            computed_distance_km: 178.5,
        };

        let entry = ManifestEntry::from_record(&record, QualityClass::Ok);
        assert_eq!(entry.point_count, 2);
        assert_eq!(entry.elevation_min, Some(450.0));
        assert_eq!(entry.elevation_max, Some(1200.0));
        assert_eq!(entry.quality, QualityClass::Ok);
    }

    #[test]
    fn test_record_roundtrip_json() {
        let record = TrailRecord {
            id: "wct".to_string(),
            name: "West Coast Trail".to_string(),
            region: None,
            country: Some("CA".to_string()),
            official_distance_km: 75.0,
            multi_day: true,
            points: vec![GpsPoint::new(48.76, -125.2)],
            source: "gis-layer".to_string(),
            computed_distance_km: 74.1,
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: TrailRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, "wct");
        assert_eq!(back.points.len(), 1);
        assert!(json.contains("officialDistanceKm"));
    }
}

//! Declarative per-trail repair hints.
//!
//! Some trails need overrides no heuristic can infer: a known loop must
//! never be mirrored, a trail crossing a wide ferry gap needs a larger gap
//! threshold. Instead of bespoke code paths per trail, these live in a
//! {trail id -> hints} table consumed by the orchestrator, typically
//! loaded from a JSON file next to the trail catalog:
//!
//! ```json
//! {
//!   "kungsleden": { "gapThresholdKm": 6.0 },
//!   "tour-du-mont-blanc": { "knownLoop": true }
//! }
//! ```

use crate::error::{Result, TrailMendError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Overrides for one trail's repair run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepairHints {
    /// Override the gap threshold used for segment extraction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_threshold_km: Option<f64>,
    /// Never apply out-and-back mirroring to this trail
    pub skip_mirror: bool,
    /// The trail is a known loop; implies `skip_mirror`
    pub known_loop: bool,
}

/// A table of per-trail repair hints keyed by trail id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HintTable(HashMap<String, RepairHints>);

impl HintTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a hint table from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TrailMendError::HintsError {
            message: e.to_string(),
        })
    }

    /// Look up the hints for a trail id.
    pub fn get(&self, trail_id: &str) -> Option<&RepairHints> {
        self.0.get(trail_id)
    }

    pub fn insert(&mut self, trail_id: impl Into<String>, hints: RepairHints) {
        self.0.insert(trail_id.into(), hints);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

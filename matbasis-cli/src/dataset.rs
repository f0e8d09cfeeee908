//! Dataset Input
//!
//! JSON test-data files produced by the intake tooling: one entry per
//! property with its raw specimen readings and the unit they were recorded
//! in. A reading may be null where a specimen was voided; the statistics
//! engine discards those along with any NaN that slipped through.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One dataset file: a material and its per-property readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Free-text material identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Property readings keyed by property identifier.
    pub properties: BTreeMap<String, PropertyReadings>,
}

/// Raw readings for one property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyReadings {
    /// Specimen readings in test order; null marks a voided specimen.
    pub values: Vec<Option<f64>>,
    /// Unit symbol the readings were recorded in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

impl Dataset {
    /// Load a dataset from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset: {}", path.display()))?;
        let dataset: Dataset = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse dataset: {}", path.display()))?;
        Ok(dataset)
    }
}

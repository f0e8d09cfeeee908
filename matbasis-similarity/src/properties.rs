//! Property Sets
//!
//! String-keyed numeric property values for one material or requirement
//! profile. Keys are free-form property identifiers ("FTU_L", "E1_c",
//! "density"); the scorer treats them opaquely.

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Property values keyed by property identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertySet {
    values: FxHashMap<String, f64>,
}

impl PropertySet {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property value, replacing any previous value.
    pub fn set(&mut self, property_id: impl Into<String>, value: f64) {
        self.values.insert(property_id.into(), value);
    }

    /// Get a property value by identifier.
    pub fn get(&self, property_id: &str) -> Option<f64> {
        self.values.get(property_id).copied()
    }

    /// Whether a property is present.
    pub fn contains(&self, property_id: &str) -> bool {
        self.values.contains_key(property_id)
    }

    /// Number of properties in the set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set holds no properties.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All property identifiers, in arbitrary order.
    pub fn property_ids(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for PropertySet {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(id, v)| (id.into(), v)).collect(),
        }
    }
}

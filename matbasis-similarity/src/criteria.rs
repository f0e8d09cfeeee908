//! Comparison Criteria
//!
//! One criterion per property considered in a comparison: its relative
//! weight, whether it is critical, and an optional tolerance band.
//! Criteria usually arrive from TOML requirement profiles, so everything
//! here derives serde with defaults matching the common case.

use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Weighting and gating for a single property in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityCriterion {
    /// Identifier of the property this criterion applies to.
    pub property_id: String,
    /// Relative importance in the weighted aggregate, nominally 0.0..=1.0.
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// A critical property that fails or is missing invalidates the whole
    /// comparison.
    #[serde(default)]
    pub critical: bool,
    /// Allowed fractional deviation (0.10 means ±10%). Without a tolerance
    /// the property is scored but never classified FAIL or MARGINAL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
}

fn default_weight() -> f64 {
    1.0
}

/// Problems found in a criteria list.
///
/// The scorer itself accepts any list; validation is for profile loaders
/// that want to reject configuration mistakes up front.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriteriaError {
    /// Weight is outside the nominal range or not a number.
    #[error("criterion '{property_id}' has weight {weight}; expected a value in 0.0..=1.0")]
    WeightOutOfRange {
        /// Offending criterion's property identifier.
        property_id: String,
        /// The rejected weight.
        weight: f64,
    },
    /// Tolerance is zero, negative, or not finite.
    #[error("criterion '{property_id}' has tolerance {tolerance}; expected a positive fraction")]
    InvalidTolerance {
        /// Offending criterion's property identifier.
        property_id: String,
        /// The rejected tolerance.
        tolerance: f64,
    },
    /// The same property appears in more than one criterion.
    #[error("criterion '{property_id}' appears more than once")]
    DuplicateProperty {
        /// The repeated property identifier.
        property_id: String,
    },
    /// The criteria list is empty.
    #[error("criteria list is empty")]
    Empty,
}

/// Validate a criteria list loaded from configuration.
///
/// Returns the first problem found, checking each criterion in order.
pub fn validate_criteria(criteria: &[SimilarityCriterion]) -> Result<(), CriteriaError> {
    if criteria.is_empty() {
        return Err(CriteriaError::Empty);
    }

    let mut seen = FxHashSet::default();
    for criterion in criteria {
        if !(0.0..=1.0).contains(&criterion.weight) {
            return Err(CriteriaError::WeightOutOfRange {
                property_id: criterion.property_id.clone(),
                weight: criterion.weight,
            });
        }
        if let Some(tolerance) = criterion.tolerance {
            if !tolerance.is_finite() || tolerance <= 0.0 {
                return Err(CriteriaError::InvalidTolerance {
                    property_id: criterion.property_id.clone(),
                    tolerance,
                });
            }
        }
        if !seen.insert(criterion.property_id.as_str()) {
            return Err(CriteriaError::DuplicateProperty {
                property_id: criterion.property_id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(property_id: &str) -> SimilarityCriterion {
        SimilarityCriterion {
            property_id: property_id.to_string(),
            weight: 1.0,
            critical: false,
            tolerance: None,
        }
    }

    #[test]
    fn test_valid_criteria_pass() {
        let criteria = vec![
            SimilarityCriterion {
                tolerance: Some(0.10),
                critical: true,
                ..criterion("FTU_L")
            },
            SimilarityCriterion {
                weight: 0.5,
                ..criterion("density")
            },
        ];
        assert!(validate_criteria(&criteria).is_ok());
    }

    #[test]
    fn test_empty_list_rejected() {
        assert_eq!(validate_criteria(&[]), Err(CriteriaError::Empty));
    }

    #[test]
    fn test_weight_out_of_range_rejected() {
        for bad_weight in [-0.1, 1.5, f64::NAN] {
            let criteria = vec![SimilarityCriterion {
                weight: bad_weight,
                ..criterion("FTU_L")
            }];
            assert!(matches!(
                validate_criteria(&criteria),
                Err(CriteriaError::WeightOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_non_positive_tolerance_rejected() {
        for bad_tolerance in [0.0, -0.05, f64::INFINITY] {
            let criteria = vec![SimilarityCriterion {
                tolerance: Some(bad_tolerance),
                ..criterion("E1")
            }];
            assert!(matches!(
                validate_criteria(&criteria),
                Err(CriteriaError::InvalidTolerance { .. })
            ));
        }
    }

    #[test]
    fn test_duplicate_property_rejected() {
        let criteria = vec![criterion("FTU_L"), criterion("E1"), criterion("FTU_L")];
        assert_eq!(
            validate_criteria(&criteria),
            Err(CriteriaError::DuplicateProperty {
                property_id: "FTU_L".to_string()
            })
        );
    }

    #[test]
    fn test_deserializes_from_profile_toml() {
        let toml = r#"
            property_id = "FTU_L"
            weight = 0.8
            critical = true
            tolerance = 0.10
        "#;
        let criterion: SimilarityCriterion = toml::from_str(toml).unwrap();
        assert_eq!(criterion.property_id, "FTU_L");
        assert_eq!(criterion.weight, 0.8);
        assert!(criterion.critical);
        assert_eq!(criterion.tolerance, Some(0.10));
    }

    #[test]
    fn test_deserialization_defaults() {
        let criterion: SimilarityCriterion =
            toml::from_str(r#"property_id = "density""#).unwrap();
        assert_eq!(criterion.weight, 1.0);
        assert!(!criterion.critical);
        assert_eq!(criterion.tolerance, None);
    }
}

#![warn(missing_docs)]
//! # Matbasis
//!
//! Statistical allowables and similarity scoring for composite material
//! test data.
//!
//! Matbasis is the computational core of a material master-data system:
//!
//! - **Allowables** ([`compute_stats`]): descriptive statistics plus
//!   one-sided lower tolerance-limit basis values (B-Basis at 90%/95%,
//!   A-Basis at 99%/95%) from the fixed published k-factor tables, with
//!   advisory warnings for small or scattered samples.
//! - **Similarity** ([`compute_similarity`]): weighted comparability
//!   scoring of a candidate material against a target profile, with
//!   per-property tolerance gating and critical-criterion viability.
//! - **Units** ([`convert`]): metric / US-customary conversions for the
//!   units properties are recorded in.
//!
//! Every computation is pure and total. Feed it anything; it returns a
//! result, never panics, and reads no ambient state.
//!
//! ## Quick Start
//!
//! ```
//! use matbasis::prelude::*;
//!
//! let result = compute_stats(&[88.2, 91.4, 90.1, 89.7, 92.3]);
//! assert_eq!(result.n, 5);
//! assert!(result.b_basis.unwrap() < result.mean);
//!
//! let target = PropertySet::from_iter([("FTU_L", 540.0)]);
//! let candidate = PropertySet::from_iter([("FTU_L", 533.1)]);
//! let criteria = [SimilarityCriterion {
//!     property_id: "FTU_L".to_string(),
//!     weight: 1.0,
//!     critical: true,
//!     tolerance: Some(0.05),
//! }];
//! let similarity = compute_similarity(&target, &candidate, &criteria);
//! assert!(similarity.is_viable);
//! ```

pub use matbasis_similarity::{
    CriteriaError, MARGINAL_FRACTION, PropertyComparison, PropertySet, PropertyStatus,
    SimilarityCriterion, SimilarityResult, ZERO_SCORE_DEVIATION, compute_similarity,
    validate_criteria,
};
pub use matbasis_stats::{
    Basis, CERTIFICATION_SAMPLE_THRESHOLD, HIGH_CV_THRESHOLD, LOW_RELIABILITY_THRESHOLD,
    MIN_BASIS_SAMPLES, StatsConfig, StatsResult, compute_stats, compute_stats_opt,
    compute_stats_with, k_factor, tabulated_factors,
};
pub use matbasis_units::{Dimension, Unit, UnitError, UnitSystem, convert};

/// Convenience re-exports for the common call sites.
pub mod prelude {
    pub use crate::{
        Basis, PropertySet, PropertyStatus, SimilarityCriterion, SimilarityResult, StatsConfig,
        StatsResult, Unit, compute_similarity, compute_stats, compute_stats_opt,
        compute_stats_with, convert, k_factor, validate_criteria,
    };
}

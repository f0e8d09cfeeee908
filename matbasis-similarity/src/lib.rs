#![warn(missing_docs)]
//! Matbasis Similarity Scorer
//!
//! Scores how closely a candidate material's properties match a target
//! profile, one weighted criterion per property:
//!
//! - Per-property linear decay score with signed percent deviation
//! - Tolerance gating into MATCH / MARGINAL / FAIL, with MISSING for
//!   properties absent on either side
//! - Critical criteria that veto overall viability on FAIL or MISSING
//!
//! Like the statistical engine, scoring is pure and total: any combination
//! of property sets and criteria produces a result, never an error.
//! Validation of criteria lists is a separate, explicit step for callers
//! that load profiles from configuration.

mod criteria;
mod properties;
mod score;

pub use criteria::{CriteriaError, SimilarityCriterion, validate_criteria};
pub use properties::PropertySet;
pub use score::{PropertyComparison, PropertyStatus, SimilarityResult, compute_similarity};

/// Fractional deviation at which a per-property score reaches zero.
///
/// The score decays linearly from 100 at zero deviation to 0 at 50%
/// deviation and stays there.
pub const ZERO_SCORE_DEVIATION: f64 = 0.5;

/// Fraction of the tolerance band beyond which an in-tolerance property is
/// classified MARGINAL instead of MATCH.
pub const MARGINAL_FRACTION: f64 = 0.8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_constants() {
        assert!(ZERO_SCORE_DEVIATION > 0.0);
        assert!(MARGINAL_FRACTION > 0.0 && MARGINAL_FRACTION < 1.0);
    }
}

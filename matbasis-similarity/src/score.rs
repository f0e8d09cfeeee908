//! Similarity Scoring
//!
//! Weighted comparability scoring between a target property profile and a
//! candidate's properties, with per-property tolerance gating.
//!
//! **Critical Design Decision**: a property missing from either side is
//! excluded from the weighted aggregate entirely instead of contributing a
//! zero score, so absent data cannot drag the score down twice. Its
//! criticality still gates overall viability.

use serde::{Deserialize, Serialize};

use crate::criteria::SimilarityCriterion;
use crate::properties::PropertySet;
use crate::{MARGINAL_FRACTION, ZERO_SCORE_DEVIATION};

/// Classification of one property against its criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertyStatus {
    /// Within tolerance, or no tolerance declared.
    Match,
    /// Within tolerance but inside the outer part of the band.
    Marginal,
    /// Outside the declared tolerance.
    Fail,
    /// Value absent from the target or the candidate.
    Missing,
}

impl PropertyStatus {
    /// Whether the property passed its tolerance gate (MATCH or MARGINAL).
    pub fn is_acceptable(&self) -> bool {
        matches!(self, PropertyStatus::Match | PropertyStatus::Marginal)
    }

    /// Whether the property contributed to the weighted aggregate.
    pub fn is_scored(&self) -> bool {
        !matches!(self, PropertyStatus::Missing)
    }
}

impl std::fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            PropertyStatus::Match => "MATCH",
            PropertyStatus::Marginal => "MARGINAL",
            PropertyStatus::Fail => "FAIL",
            PropertyStatus::Missing => "MISSING",
        };
        write!(f, "{tag}")
    }
}

/// Comparison outcome for one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyComparison {
    /// Property identifier from the criterion.
    pub property_id: String,
    /// Unweighted per-property score in 0.0..=100.0.
    pub score: f64,
    /// Signed deviation of the candidate from the target, in percent.
    pub delta: f64,
    /// Classification against the criterion's tolerance.
    pub status: PropertyStatus,
}

/// Aggregate outcome of comparing a candidate against a target profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    /// Weighted aggregate score rounded to an integer in 0..=100.
    pub score: u32,
    /// False when any critical criterion failed or was missing.
    pub is_viable: bool,
    /// Per-criterion outcomes, in criteria order.
    pub details: Vec<PropertyComparison>,
}

impl SimilarityResult {
    /// Details with a given status, in criteria order.
    pub fn with_status(
        &self,
        status: PropertyStatus,
    ) -> impl Iterator<Item = &PropertyComparison> {
        self.details.iter().filter(move |d| d.status == status)
    }
}

/// Score how closely `candidate` matches `target` under `criteria`.
///
/// Criteria are evaluated in input order and each produces one entry in
/// `details`. Per present property the score decays linearly from 100 at
/// zero deviation to 0 at [`ZERO_SCORE_DEVIATION`]; the aggregate is the
/// weight-normalized mean of those scores, rounded. Properties with a
/// tolerance are classified MATCH, MARGINAL (inside the band but past
/// [`MARGINAL_FRACTION`] of it), or FAIL; without a tolerance they always
/// read MATCH. A FAIL or MISSING on a critical criterion clears
/// `is_viable`.
///
/// The function never fails: empty criteria, empty property sets, and
/// zero-valued targets all produce defined results.
pub fn compute_similarity(
    target: &PropertySet,
    candidate: &PropertySet,
    criteria: &[SimilarityCriterion],
) -> SimilarityResult {
    let mut details = Vec::with_capacity(criteria.len());
    let mut is_viable = true;
    let mut total_score = 0.0;
    let mut total_weight = 0.0;

    for criterion in criteria {
        let (target_value, candidate_value) = match (
            target.get(&criterion.property_id),
            candidate.get(&criterion.property_id),
        ) {
            (Some(t), Some(c)) => (t, c),
            _ => {
                if criterion.critical {
                    is_viable = false;
                }
                // missing properties stay out of both accumulators
                details.push(PropertyComparison {
                    property_id: criterion.property_id.clone(),
                    score: 0.0,
                    delta: 0.0,
                    status: PropertyStatus::Missing,
                });
                continue;
            }
        };

        let delta = if target_value == 0.0 {
            0.0
        } else {
            (candidate_value - target_value) / target_value
        };
        let abs_delta = delta.abs();

        let raw_score = (100.0 * (1.0 - abs_delta / ZERO_SCORE_DEVIATION)).max(0.0);

        let status = match criterion.tolerance {
            Some(tolerance) if abs_delta > tolerance => {
                if criterion.critical {
                    is_viable = false;
                }
                PropertyStatus::Fail
            }
            Some(tolerance) if abs_delta > tolerance * MARGINAL_FRACTION => {
                PropertyStatus::Marginal
            }
            _ => PropertyStatus::Match,
        };

        total_score += raw_score * criterion.weight;
        total_weight += criterion.weight;

        details.push(PropertyComparison {
            property_id: criterion.property_id.clone(),
            score: raw_score,
            delta: delta * 100.0,
            status,
        });
    }

    let score = if total_weight > 0.0 {
        (total_score / total_weight).round() as u32
    } else {
        0
    };

    SimilarityResult {
        score,
        is_viable,
        details,
    }
}

//! Allowables Summary
//!
//! Descriptive statistics plus one-sided lower tolerance-limit basis values
//! for one property's raw test measurements.
//!
//! **Critical Design Decision**: every function here is total. Empty
//! samples, single specimens, and zero means all produce well-defined
//! results with advisory warnings instead of errors, because the callers
//! are report pipelines that must keep going no matter what a dataset
//! contains.

use serde::{Deserialize, Serialize};

use crate::kfactor::{Basis, k_factor};
use crate::{
    CERTIFICATION_SAMPLE_THRESHOLD, HIGH_CV_THRESHOLD, LOW_RELIABILITY_THRESHOLD,
    MIN_BASIS_SAMPLES,
};

/// Statistical summary of one property's measurements.
///
/// `n` counts the clean sample, after non-finite values are discarded. The
/// basis fields are present only when they were requested and the clean
/// sample had at least [`MIN_BASIS_SAMPLES`] specimens; they are not
/// clamped, so a small scattered sample can legitimately produce a
/// negative basis value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResult {
    /// Arithmetic mean of the clean sample.
    pub mean: f64,
    /// Bessel-corrected sample standard deviation; 0.0 when n < 2.
    pub std_dev: f64,
    /// Coefficient of variation in percent; 0.0 when the mean is zero.
    pub cv: f64,
    /// Smallest clean value.
    pub min: f64,
    /// Largest clean value.
    pub max: f64,
    /// Clean sample size.
    pub n: usize,
    /// B-Basis value: mean - k_B(n) * std_dev.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b_basis: Option<f64>,
    /// A-Basis value: mean - k_A(n) * std_dev.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a_basis: Option<f64>,
    /// Advisory warnings about sample quality, in emission order.
    pub warnings: Vec<String>,
}

/// Selects which sections of a [`StatsResult`] are computed.
///
/// An explicit struct with named fields; the default requests everything.
/// `mean`, `std_dev`, and `n` are always populated since the basis values
/// derive from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Compute the descriptive block (cv, min, max) and the scatter warning.
    #[serde(default = "default_true")]
    pub calculate_basic: bool,
    /// Compute the B-Basis value.
    #[serde(default = "default_true")]
    pub calculate_b_basis: bool,
    /// Compute the A-Basis value.
    #[serde(default = "default_true")]
    pub calculate_a_basis: bool,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            calculate_basic: true,
            calculate_b_basis: true,
            calculate_a_basis: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Compute the full summary for a raw sample with everything enabled.
///
/// Non-finite entries (NaN and infinities) are discarded before any
/// statistic is computed. An empty or fully invalid sample yields the
/// zeroed sentinel result carrying the no-data warning.
pub fn compute_stats(values: &[f64]) -> StatsResult {
    compute_stats_with(values, &StatsConfig::default())
}

/// Compute the summary for a sample of optional readings.
///
/// Datasets serialized by the intake tools represent skipped specimens as
/// nulls; those flatten to invalid entries and are discarded exactly like
/// NaN.
pub fn compute_stats_opt(values: &[Option<f64>]) -> StatsResult {
    let flat: Vec<f64> = values.iter().map(|v| v.unwrap_or(f64::NAN)).collect();
    compute_stats(&flat)
}

/// Compute the summary with an explicit section selection.
pub fn compute_stats_with(values: &[f64], config: &StatsConfig) -> StatsResult {
    let clean = clean_sample(values);
    let n = clean.len();

    if n == 0 {
        return StatsResult {
            mean: 0.0,
            std_dev: 0.0,
            cv: 0.0,
            min: 0.0,
            max: 0.0,
            n: 0,
            b_basis: None,
            a_basis: None,
            warnings: vec!["No valid data provided".to_string()],
        };
    }

    let mean = sample_mean(&clean);
    let std_dev = sample_std_dev(&clean, mean);

    let mut warnings = Vec::new();
    if n < LOW_RELIABILITY_THRESHOLD {
        warnings.push("Fewer than 5 valid specimens; statistical reliability is low".to_string());
    }
    if n < CERTIFICATION_SAMPLE_THRESHOLD {
        warnings.push(
            "Fewer than 30 valid specimens; insufficient for certification-level significance"
                .to_string(),
        );
    }

    let mut cv = 0.0;
    let mut min = 0.0;
    let mut max = 0.0;
    if config.calculate_basic {
        min = clean.iter().copied().fold(f64::INFINITY, f64::min);
        max = clean.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        cv = if mean == 0.0 {
            0.0
        } else {
            (std_dev / mean) * 100.0
        };
        if cv > HIGH_CV_THRESHOLD {
            warnings
                .push("Coefficient of variation exceeds 10%; high scatter in test data".to_string());
        }
    }

    let b_basis = (config.calculate_b_basis && n >= MIN_BASIS_SAMPLES)
        .then(|| mean - k_factor(n, Basis::B) * std_dev);
    let a_basis = (config.calculate_a_basis && n >= MIN_BASIS_SAMPLES)
        .then(|| mean - k_factor(n, Basis::A) * std_dev);

    StatsResult {
        mean,
        std_dev,
        cv,
        min,
        max,
        n,
        b_basis,
        a_basis,
        warnings,
    }
}

/// Keep only finite measurement values.
fn clean_sample(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| v.is_finite()).collect()
}

fn sample_mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Bessel-corrected sample standard deviation; 0.0 when fewer than two
/// specimens.
fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}

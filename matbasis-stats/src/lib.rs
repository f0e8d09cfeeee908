#![warn(missing_docs)]
//! Matbasis Statistical Engine
//!
//! Computes design-value statistics for material test samples:
//!
//! - Descriptive summary: mean, sample standard deviation, coefficient of
//!   variation, extremes
//! - One-sided lower tolerance-limit basis values (B-Basis and A-Basis) at
//!   95% confidence, using the fixed published k-factor tables
//! - Advisory warnings for small or highly scattered samples
//!
//! All functions in this crate are pure and total: no I/O, no shared state,
//! and no panics. Degenerate input produces a sentinel result plus a warning
//! rather than an error, so call sites never need a guard.

mod kfactor;
mod summary;

pub use kfactor::{Basis, k_factor, tabulated_factors};
pub use summary::{
    StatsConfig, StatsResult, compute_stats, compute_stats_opt, compute_stats_with,
};

/// Minimum clean sample size for computing basis values.
///
/// A standard deviation needs two specimens; below that no tolerance bound
/// is defined and the basis fields stay absent.
pub const MIN_BASIS_SAMPLES: usize = 2;

/// Clean sample sizes below this trigger the low-reliability warning.
pub const LOW_RELIABILITY_THRESHOLD: usize = 5;

/// Clean sample sizes below this trigger the certification-significance
/// warning. CMH-17-style allowables expect 30 specimens per condition.
pub const CERTIFICATION_SAMPLE_THRESHOLD: usize = 30;

/// Coefficients of variation (percent) above this trigger the scatter
/// warning.
pub const HIGH_CV_THRESHOLD: f64 = 10.0;

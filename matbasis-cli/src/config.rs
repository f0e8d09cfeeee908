//! Configuration file support (`matbasis.toml`)
//!
//! Optional per-project settings discovered by walking up from the current
//! directory, so reports come out the same no matter which subdirectory a
//! dataset is summarized from.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use matbasis_units::UnitSystem;

/// Settings loaded from `matbasis.toml`. Every section and field is
/// optional; an absent file behaves like the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatbasisConfig {
    /// Report rendering settings.
    pub output: OutputConfig,
    /// Unit display settings.
    pub units: UnitsConfig,
    /// Comparison profile settings.
    pub profile: ProfileConfig,
}

/// Report rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format: "human" or "json".
    pub format: String,
    /// Decimal places for statistic values in human output.
    pub precision: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            precision: default_precision(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

fn default_precision() -> usize {
    3
}

/// Unit display settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitsConfig {
    /// Display system for rendered values: "metric" or "imperial".
    /// Unset leaves every property in the units it was recorded in.
    pub display: Option<String>,
}

impl UnitsConfig {
    /// The configured display system, if any.
    pub fn display_system(&self) -> Result<Option<UnitSystem>> {
        match &self.display {
            Some(raw) => {
                let system = raw
                    .parse::<UnitSystem>()
                    .map_err(anyhow::Error::msg)
                    .context("invalid units.display in matbasis.toml")?;
                Ok(Some(system))
            }
            None => Ok(None),
        }
    }
}

/// Comparison profile settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Criteria profile used by `compare` when --profile is not given.
    pub path: Option<PathBuf>,
}

impl MatbasisConfig {
    /// Load configuration from an explicit file path.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Walk up from the current directory looking for `matbasis.toml`.
    pub fn discover() -> Option<PathBuf> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let candidate = dir.join("matbasis.toml");
            if candidate.is_file() {
                return Some(candidate);
            }
            if !dir.pop() {
                return None;
            }
        }
    }
}

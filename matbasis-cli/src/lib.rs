#![warn(missing_docs)]
//! Matbasis CLI
//!
//! Command-line front end over the matbasis engines: allowables statistics
//! for dataset files, similarity comparison against requirement profiles,
//! and the tolerance-limit factor tables.

mod config;
mod dataset;
mod report;

pub use config::{MatbasisConfig, OutputConfig, ProfileConfig, UnitsConfig};
pub use dataset::{Dataset, PropertyReadings};
pub use report::{
    CompareReport, FactorEntry, FactorsReport, OutputFormat, PropertyStats, ReportMeta,
    StatsReport, format_compare_human, format_factors_human, format_stats_human,
};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use matbasis_similarity::{
    PropertySet, SimilarityCriterion, compute_similarity, validate_criteria,
};
use matbasis_stats::{Basis, StatsConfig, compute_stats_opt, compute_stats_with};
use matbasis_units::{Unit, UnitSystem, convert};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "matbasis")]
#[command(version, about = "Statistical allowables and similarity scoring for material test data")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: discover matbasis.toml upward).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: human or json (overrides the config file).
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Write the report to a file instead of stdout.
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute allowables statistics for every property in a dataset
    Stats {
        /// Dataset JSON file.
        data: PathBuf,

        /// Only include properties whose identifier matches this regex.
        #[arg(short, long)]
        property: Option<String>,

        /// Skip the descriptive block (cv, min, max).
        #[arg(long)]
        no_basic: bool,

        /// Skip the B-Basis value.
        #[arg(long)]
        no_b_basis: bool,

        /// Skip the A-Basis value.
        #[arg(long)]
        no_a_basis: bool,
    },
    /// Score a candidate dataset against a target dataset
    Compare {
        /// Target (baseline) dataset JSON file.
        target: PathBuf,

        /// Candidate dataset JSON file.
        candidate: PathBuf,

        /// Criteria profile TOML (default: profile.path from matbasis.toml).
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },
    /// Print the one-sided tolerance-limit factor table
    Factors {
        /// Which table: 'b' or 'a'.
        #[arg(short, long, default_value = "b")]
        basis: String,
    },
}

/// CLI entry point: parse arguments and run.
pub fn run() -> Result<()> {
    run_with_cli(Cli::parse())
}

/// Run with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("matbasis_cli=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("matbasis_cli=warn")
            .init();
    }

    let config = load_config(cli.config.as_deref())?;
    let format = resolve_format(cli.format.as_deref(), &config)?;

    match cli.command {
        Commands::Stats {
            data,
            property,
            no_basic,
            no_b_basis,
            no_a_basis,
        } => {
            let stats_config = StatsConfig {
                calculate_basic: !no_basic,
                calculate_b_basis: !no_b_basis,
                calculate_a_basis: !no_a_basis,
            };
            let report = run_stats(&data, property.as_deref(), &stats_config, &config)?;
            let rendered = match format {
                OutputFormat::Human => format_stats_human(&report, config.output.precision),
                OutputFormat::Json => serde_json::to_string_pretty(&report)?,
            };
            write_report(&rendered, cli.output.as_deref())?;
        }
        Commands::Compare {
            target,
            candidate,
            profile,
        } => {
            let report = run_compare(&target, &candidate, profile.as_deref(), &config)?;
            let rendered = match format {
                OutputFormat::Human => format_compare_human(&report),
                OutputFormat::Json => serde_json::to_string_pretty(&report)?,
            };
            write_report(&rendered, cli.output.as_deref())?;
            if !report.result.is_viable {
                eprintln!("Candidate is not viable: a critical property failed or was missing");
                std::process::exit(1);
            }
        }
        Commands::Factors { basis } => {
            let basis: Basis = basis.parse().map_err(anyhow::Error::msg)?;
            let report = FactorsReport::new(basis);
            let rendered = match format {
                OutputFormat::Human => format_factors_human(&report),
                OutputFormat::Json => serde_json::to_string_pretty(&report)?,
            };
            write_report(&rendered, cli.output.as_deref())?;
        }
    }

    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<MatbasisConfig> {
    match explicit {
        Some(path) => MatbasisConfig::load(path),
        None => match MatbasisConfig::discover() {
            Some(path) => {
                debug!("using configuration from {}", path.display());
                MatbasisConfig::load(&path)
            }
            None => Ok(MatbasisConfig::default()),
        },
    }
}

fn resolve_format(flag: Option<&str>, config: &MatbasisConfig) -> Result<OutputFormat> {
    let raw = flag.unwrap_or(&config.output.format);
    raw.parse().map_err(anyhow::Error::msg)
}

/// Build the allowables report for one dataset.
fn run_stats(
    data: &Path,
    property_filter: Option<&str>,
    stats_config: &StatsConfig,
    config: &MatbasisConfig,
) -> Result<StatsReport> {
    let dataset = Dataset::load(data)?;
    let filter = property_filter
        .map(regex::Regex::new)
        .transpose()
        .context("invalid property filter regex")?;
    let display_system = config.units.display_system()?;

    let mut properties = Vec::new();
    for (property_id, readings) in &dataset.properties {
        if let Some(filter) = &filter {
            if !filter.is_match(property_id) {
                continue;
            }
        }
        let (values, units) = display_values(readings, display_system);
        let stats = compute_stats_with(&values, stats_config);
        debug!("summarized '{property_id}' over {} specimens", stats.n);
        properties.push(PropertyStats {
            property_id: property_id.clone(),
            units,
            stats,
        });
    }

    if properties.is_empty() {
        bail!("no properties matched in {}", data.display());
    }

    Ok(StatsReport {
        meta: ReportMeta::now(),
        source: data.display().to_string(),
        material: dataset.material.clone(),
        properties,
    })
}

/// Build the comparison report for a target/candidate pair.
fn run_compare(
    target_path: &Path,
    candidate_path: &Path,
    profile: Option<&Path>,
    config: &MatbasisConfig,
) -> Result<CompareReport> {
    let target = Dataset::load(target_path)?;
    let candidate = Dataset::load(candidate_path)?;

    let profile_path = profile
        .map(Path::to_path_buf)
        .or_else(|| config.profile.path.clone())
        .context("no criteria profile given (use --profile or set profile.path in matbasis.toml)")?;
    let criteria = load_profile(&profile_path)?;

    let target_set = build_property_set(&target);
    let mut candidate_set = build_property_set(&candidate);
    align_units(&target, &candidate, &mut candidate_set)?;

    let result = compute_similarity(&target_set, &candidate_set, &criteria);
    Ok(CompareReport {
        meta: ReportMeta::now(),
        target: target_path.display().to_string(),
        candidate: candidate_path.display().to_string(),
        result,
    })
}

/// Criteria profile file: a list of `[[criteria]]` tables.
#[derive(Debug, serde::Deserialize)]
struct Profile {
    criteria: Vec<SimilarityCriterion>,
}

fn load_profile(path: &Path) -> Result<Vec<SimilarityCriterion>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile: {}", path.display()))?;
    let profile: Profile = toml::from_str(&raw)
        .with_context(|| format!("failed to parse profile: {}", path.display()))?;
    validate_criteria(&profile.criteria)
        .with_context(|| format!("invalid profile: {}", path.display()))?;
    Ok(profile.criteria)
}

/// Clean per-property means of a dataset, for the similarity scorer.
///
/// Properties whose readings are all invalid are left out entirely so the
/// scorer reports them MISSING instead of comparing zeros.
fn build_property_set(dataset: &Dataset) -> PropertySet {
    dataset
        .properties
        .iter()
        .filter_map(|(property_id, readings)| {
            let stats = compute_stats_opt(&readings.values);
            (stats.n > 0).then(|| (property_id.clone(), stats.mean))
        })
        .collect()
}

/// Convert candidate means into the target's units where the two datasets
/// record a shared property differently.
fn align_units(
    target: &Dataset,
    candidate: &Dataset,
    candidate_set: &mut PropertySet,
) -> Result<()> {
    for (property_id, target_readings) in &target.properties {
        let candidate_readings = match candidate.properties.get(property_id) {
            Some(readings) => readings,
            None => continue,
        };
        let (target_units, candidate_units) =
            match (&target_readings.units, &candidate_readings.units) {
                (Some(t), Some(c)) if t != c => (t.as_str(), c.as_str()),
                _ => continue,
            };
        let value = match candidate_set.get(property_id) {
            Some(value) => value,
            None => continue,
        };

        let from: Unit = candidate_units
            .parse()
            .with_context(|| format!("property '{property_id}': bad candidate units"))?;
        let to: Unit = target_units
            .parse()
            .with_context(|| format!("property '{property_id}': bad target units"))?;
        let converted =
            convert(value, from, to).with_context(|| format!("property '{property_id}'"))?;
        debug!("aligned '{property_id}' from {from} to {to} for comparison");
        candidate_set.set(property_id.clone(), converted);
    }
    Ok(())
}

/// Readings flattened for the statistics engine and converted to the
/// configured display system. Unit symbols the converter does not know
/// leave the readings as recorded.
fn display_values(
    readings: &PropertyReadings,
    system: Option<UnitSystem>,
) -> (Vec<f64>, Option<String>) {
    let values = flatten_readings(&readings.values);

    let conversion = match (system, readings.units.as_deref()) {
        (Some(system), Some(symbol)) => symbol
            .parse::<Unit>()
            .ok()
            .map(|unit| (unit, unit.in_system(system))),
        _ => None,
    };

    match conversion {
        Some((from, to)) if from != to => {
            let converted = values
                .iter()
                .map(|&v| convert(v, from, to).unwrap_or(v))
                .collect();
            (converted, Some(to.symbol().to_string()))
        }
        _ => (values, readings.units.clone()),
    }
}

fn flatten_readings(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

fn write_report(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            info!("report written to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

//! Report Rendering
//!
//! Serializable report envelopes plus the human text renderer. JSON output
//! is the same envelope run through serde_json, so the two formats never
//! drift apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use matbasis_similarity::{PropertyStatus, SimilarityResult};
use matbasis_stats::{Basis, StatsResult, tabulated_factors};

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text for terminals.
    Human,
    /// Pretty-printed JSON.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{other}' (expected 'human' or 'json')"
            )),
        }
    }
}

/// Provenance block shared by every report kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    /// matbasis version that produced the report.
    pub version: String,
    /// Generation timestamp.
    pub generated_at: DateTime<Utc>,
}

impl ReportMeta {
    /// Meta block for a report generated right now.
    pub fn now() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
        }
    }
}

/// Allowables report for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    /// Provenance block.
    pub meta: ReportMeta,
    /// Dataset file the statistics were computed from.
    pub source: String,
    /// Material identifier carried over from the dataset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Per-property summaries, in dataset order.
    pub properties: Vec<PropertyStats>,
}

/// One property's summary within a [`StatsReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyStats {
    /// Property identifier from the dataset.
    pub property_id: String,
    /// Units the reported values are in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    /// The computed summary.
    #[serde(flatten)]
    pub stats: StatsResult,
}

/// Comparison report between two datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareReport {
    /// Provenance block.
    pub meta: ReportMeta,
    /// Target (baseline) dataset file.
    pub target: String,
    /// Candidate dataset file.
    pub candidate: String,
    /// The similarity outcome.
    #[serde(flatten)]
    pub result: SimilarityResult,
}

/// Tolerance-limit factor table report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorsReport {
    /// Provenance block.
    pub meta: ReportMeta,
    /// Which basis the table belongs to.
    pub basis: Basis,
    /// Tabulated entries, ascending in sample size.
    pub factors: Vec<FactorEntry>,
}

/// One tabulated (sample size, factor) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorEntry {
    /// Sample size.
    pub n: u32,
    /// Tolerance-limit factor.
    pub k: f64,
}

impl FactorsReport {
    /// Snapshot the tabulated factors for one basis.
    pub fn new(basis: Basis) -> Self {
        Self {
            meta: ReportMeta::now(),
            basis,
            factors: tabulated_factors(basis)
                .iter()
                .map(|&(n, k)| FactorEntry { n, k })
                .collect(),
        }
    }
}

/// Render an allowables report as human-readable text.
pub fn format_stats_human(report: &StatsReport, precision: usize) -> String {
    let mut output = String::new();

    output.push_str("Matbasis Allowables Report\n");
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!("Source: {}\n", report.source));
    if let Some(material) = &report.material {
        output.push_str(&format!("Material: {material}\n"));
    }
    output.push_str(&format!(
        "Generated: {}\n",
        report.meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    for property in &report.properties {
        output.push('\n');
        match &property.units {
            Some(units) => {
                output.push_str(&format!("{} [{units}]\n", property.property_id))
            }
            None => output.push_str(&format!("{}\n", property.property_id)),
        }
        output.push_str(&"-".repeat(60));
        output.push('\n');

        let stats = &property.stats;
        output.push_str(&format!(
            "  n: {:<5} mean: {:.prec$}   std dev: {:.prec$}   cv: {:.2}%\n",
            stats.n,
            stats.mean,
            stats.std_dev,
            stats.cv,
            prec = precision
        ));
        output.push_str(&format!(
            "  min: {:.prec$}   max: {:.prec$}\n",
            stats.min,
            stats.max,
            prec = precision
        ));
        if let Some(b_basis) = stats.b_basis {
            output.push_str(&format!("  B-Basis: {b_basis:.precision$}\n"));
        }
        if let Some(a_basis) = stats.a_basis {
            output.push_str(&format!("  A-Basis: {a_basis:.precision$}\n"));
        }
        for warning in &stats.warnings {
            output.push_str(&format!("  warning: {warning}\n"));
        }
    }

    output
}

/// Render a comparison report as human-readable text.
pub fn format_compare_human(report: &CompareReport) -> String {
    let mut output = String::new();

    output.push_str("Matbasis Comparison Report\n");
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!("Target:    {}\n", report.target));
    output.push_str(&format!("Candidate: {}\n", report.candidate));
    output.push_str(&format!(
        "Generated: {}\n\n",
        report.meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    let width = report
        .result
        .details
        .iter()
        .map(|d| d.property_id.len())
        .max()
        .unwrap_or(0)
        .max("Property".len());

    output.push_str(&format!(
        "  {:<width$}   {:>8}   {:>6}   Status\n",
        "Property", "Delta", "Score"
    ));
    output.push_str(&format!("  {}\n", "-".repeat(width + 32)));
    for detail in &report.result.details {
        let icon = status_icon(detail.status);
        output.push_str(&format!(
            "  {:<width$}   {:>7.2}%   {:>6.1}   {icon} {}\n",
            detail.property_id, detail.delta, detail.score, detail.status
        ));
    }

    output.push('\n');
    output.push_str(&"-".repeat(60));
    output.push('\n');
    let match_count = report.result.with_status(PropertyStatus::Match).count();
    let marginal_count = report.result.with_status(PropertyStatus::Marginal).count();
    let fail_count = report.result.with_status(PropertyStatus::Fail).count();
    let missing_count = report.result.with_status(PropertyStatus::Missing).count();
    output.push_str(&format!(
        "Properties: {match_count} match, {marginal_count} marginal, {fail_count} fail, {missing_count} missing\n"
    ));
    output.push_str(&format!("Overall score: {}/100\n", report.result.score));
    output.push_str(&format!(
        "Viable: {}\n",
        if report.result.is_viable { "yes" } else { "NO" }
    ));

    output
}

/// Render the factor table as human-readable text.
pub fn format_factors_human(report: &FactorsReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "One-Sided Tolerance-Limit Factors ({})\n",
        report.basis
    ));
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!("  {:>5}   {:>8}\n", "n", "k"));
    for entry in &report.factors {
        output.push_str(&format!("  {:>5}   {:>8.3}\n", entry.n, entry.k));
    }
    output.push_str(
        "\nSample sizes between entries use the next lower tabulated size.\n",
    );

    output
}

fn status_icon(status: PropertyStatus) -> &'static str {
    match status {
        PropertyStatus::Match => "✓",
        PropertyStatus::Marginal => "⚠",
        PropertyStatus::Fail => "✗",
        PropertyStatus::Missing => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matbasis_similarity::PropertyComparison;
    use matbasis_stats::compute_stats;

    fn dummy_stats_report() -> StatsReport {
        StatsReport {
            meta: ReportMeta::now(),
            source: "pulls.json".to_string(),
            material: Some("T700/2510".to_string()),
            properties: vec![PropertyStats {
                property_id: "FTU_L".to_string(),
                units: Some("MPa".to_string()),
                stats: compute_stats(&[2172.0, 2210.5, 2155.2, 2189.0, 2201.8]),
            }],
        }
    }

    fn dummy_compare_report() -> CompareReport {
        CompareReport {
            meta: ReportMeta::now(),
            target: "baseline.json".to_string(),
            candidate: "candidate.json".to_string(),
            result: SimilarityResult {
                score: 94,
                is_viable: false,
                details: vec![
                    PropertyComparison {
                        property_id: "FTU_L".to_string(),
                        score: 94.2,
                        delta: -2.9,
                        status: PropertyStatus::Match,
                    },
                    PropertyComparison {
                        property_id: "density".to_string(),
                        score: 0.0,
                        delta: 0.0,
                        status: PropertyStatus::Missing,
                    },
                ],
            },
        }
    }

    #[test]
    fn test_stats_human_output_sections() {
        let rendered = format_stats_human(&dummy_stats_report(), 3);
        assert!(rendered.contains("Matbasis Allowables Report"));
        assert!(rendered.contains("Material: T700/2510"));
        assert!(rendered.contains("FTU_L [MPa]"));
        assert!(rendered.contains("B-Basis:"));
        assert!(rendered.contains("A-Basis:"));
        assert!(rendered.contains("warning: Fewer than 30"));
    }

    #[test]
    fn test_stats_human_respects_precision() {
        let rendered = format_stats_human(&dummy_stats_report(), 1);
        assert!(rendered.contains("mean: 2185.7"));
    }

    #[test]
    fn test_compare_human_output_sections() {
        let rendered = format_compare_human(&dummy_compare_report());
        assert!(rendered.contains("Matbasis Comparison Report"));
        assert!(rendered.contains("Target:    baseline.json"));
        assert!(rendered.contains("MATCH"));
        assert!(rendered.contains("MISSING"));
        assert!(rendered.contains("1 match, 0 marginal, 0 fail, 1 missing"));
        assert!(rendered.contains("Overall score: 94/100"));
        assert!(rendered.contains("Viable: NO"));
    }

    #[test]
    fn test_factors_report_covers_table() {
        let report = FactorsReport::new(Basis::B);
        assert_eq!(report.factors.len(), 38);
        assert_eq!(report.factors[0].n, 2);
        let rendered = format_factors_human(&report);
        assert!(rendered.contains("B-Basis"));
        assert!(rendered.contains("20.581"));
        assert!(rendered.contains("1.515"));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("human".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_stats_report_json_round_trip() {
        let report = dummy_stats_report();
        let json = serde_json::to_string_pretty(&report).unwrap();
        let parsed: StatsReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}

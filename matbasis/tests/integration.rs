//! Integration tests exercising the public matbasis API end to end:
//! allowables statistics, similarity scoring, and the unit conversions
//! that tie datasets recorded in different systems together.

use matbasis::HIGH_CV_THRESHOLD;
use matbasis::prelude::*;

const EPSILON: f64 = 1e-9;

fn criterion(property_id: &str) -> SimilarityCriterion {
    SimilarityCriterion {
        property_id: property_id.to_string(),
        weight: 1.0,
        critical: false,
        tolerance: None,
    }
}

#[test]
fn test_empty_input_yields_sentinel_result() {
    let result = compute_stats(&[]);
    assert_eq!(result.n, 0);
    assert_eq!(result.mean, 0.0);
    assert_eq!(result.std_dev, 0.0);
    assert_eq!(result.cv, 0.0);
    assert_eq!(result.min, 0.0);
    assert_eq!(result.max, 0.0);
    assert!(result.b_basis.is_none());
    assert!(result.a_basis.is_none());
    assert_eq!(result.warnings, vec!["No valid data provided".to_string()]);

    // absent basis values serialize as absent keys, not nulls or zeros
    let json = serde_json::to_value(&result).unwrap();
    let object = json.as_object().unwrap();
    assert!(!object.contains_key("b_basis"));
    assert!(!object.contains_key("a_basis"));
}

#[test]
fn test_single_specimen_reports_but_never_extrapolates() {
    let result = compute_stats(&[42.0]);
    assert_eq!(result.n, 1);
    assert_eq!(result.mean, 42.0);
    assert_eq!(result.std_dev, 0.0);
    assert_eq!(result.min, 42.0);
    assert_eq!(result.max, 42.0);
    assert!(result.b_basis.is_none());
    assert!(result.a_basis.is_none());
}

#[test]
fn test_zero_variance_sample_pins_basis_to_mean() {
    let result = compute_stats(&[10.0, 10.0, 10.0, 10.0, 10.0]);
    assert_eq!(result.mean, 10.0);
    assert_eq!(result.std_dev, 0.0);
    assert_eq!(result.b_basis, Some(10.0));
    assert_eq!(result.a_basis, Some(10.0));
    // exactly one advisory: below the certification threshold, but not
    // below the reliability floor and with zero scatter
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("30"));
}

#[test]
fn test_ten_specimen_basis_uses_tabulated_factors() {
    let values = [
        85.0, 90.0, 95.0, 95.0, 100.0, 100.0, 105.0, 105.0, 110.0, 115.0,
    ];
    let result = compute_stats(&values);
    assert_eq!(result.n, 10);
    assert!(
        (result.b_basis.unwrap() - (result.mean - 2.355 * result.std_dev)).abs() < EPSILON
    );
    assert!(
        (result.a_basis.unwrap() - (result.mean - 3.981 * result.std_dev)).abs() < EPSILON
    );
}

#[test]
fn test_large_sample_falls_back_to_last_table_entry() {
    assert_eq!(k_factor(150, Basis::B), 1.515);
    let values: Vec<f64> = (0..150).map(|i| 500.0 + (i % 11) as f64).collect();
    let result = compute_stats(&values);
    assert!(
        (result.b_basis.unwrap() - (result.mean - 1.515 * result.std_dev)).abs() < EPSILON
    );
}

#[test]
fn test_missing_noncritical_property_keeps_viability() {
    let target = PropertySet::from_iter([("FTU_L", 100.0)]);
    let candidate = PropertySet::new();
    let result = compute_similarity(&target, &candidate, &[criterion("FTU_L")]);
    assert_eq!(result.score, 0);
    assert!(result.is_viable);
    assert_eq!(result.details.len(), 1);
    assert_eq!(result.details[0].status, PropertyStatus::Missing);
}

#[test]
fn test_critical_out_of_tolerance_fails_viability() {
    let target = PropertySet::from_iter([("FTU_L", 100.0)]);
    let candidate = PropertySet::from_iter([("FTU_L", 125.0)]);
    let criteria = [SimilarityCriterion {
        critical: true,
        tolerance: Some(0.10),
        ..criterion("FTU_L")
    }];
    let result = compute_similarity(&target, &candidate, &criteria);
    assert!(!result.is_viable);
    assert_eq!(result.details[0].status, PropertyStatus::Fail);
    assert!((result.details[0].score - 50.0).abs() < EPSILON);
    assert_eq!(result.score, 50);
}

#[test]
fn test_both_engines_are_pure() {
    let values = [88.2, 91.4, 90.1, 89.7, 92.3, 87.9];
    assert_eq!(compute_stats(&values), compute_stats(&values));

    let target = PropertySet::from_iter([("FTU_L", 540.0), ("E1", 135.0)]);
    let candidate = PropertySet::from_iter([("FTU_L", 533.1), ("E1", 131.0)]);
    let criteria = [
        SimilarityCriterion {
            critical: true,
            tolerance: Some(0.05),
            ..criterion("FTU_L")
        },
        SimilarityCriterion {
            weight: 0.5,
            ..criterion("E1")
        },
    ];
    assert_eq!(
        compute_similarity(&target, &candidate, &criteria),
        compute_similarity(&target, &candidate, &criteria)
    );
}

#[test]
fn test_score_decays_and_status_never_improves() {
    let target = PropertySet::from_iter([("FTU_L", 100.0)]);
    let criteria = [SimilarityCriterion {
        tolerance: Some(0.10),
        ..criterion("FTU_L")
    }];

    let mut last_score = u32::MAX;
    let mut last_rank = 0u8;
    for step in 0..=30 {
        let candidate = PropertySet::from_iter([("FTU_L", 100.0 + 2.0 * step as f64)]);
        let result = compute_similarity(&target, &candidate, &criteria);
        assert!(result.score <= last_score);
        let rank = match result.details[0].status {
            PropertyStatus::Match => 0,
            PropertyStatus::Marginal => 1,
            PropertyStatus::Fail => 2,
            PropertyStatus::Missing => unreachable!(),
        };
        assert!(rank >= last_rank);
        last_score = result.score;
        last_rank = rank;
    }
}

#[test]
fn test_allowables_feed_comparison() {
    // the usual pipeline: summarize both datasets, then compare the means
    let target_pulls = [541.0, 543.5, 539.2, 540.8, 542.0, 538.5];
    let candidate_pulls = [528.0, 531.5, 527.2, 530.1, 529.6, 526.8];

    let target_stats = compute_stats(&target_pulls);
    let candidate_stats = compute_stats(&candidate_pulls);

    let target = PropertySet::from_iter([("FTU_L", target_stats.mean)]);
    let candidate = PropertySet::from_iter([("FTU_L", candidate_stats.mean)]);
    let criteria = [SimilarityCriterion {
        critical: true,
        tolerance: Some(0.05),
        ..criterion("FTU_L")
    }];

    let result = compute_similarity(&target, &candidate, &criteria);
    // candidate runs about 2.2% weak: inside the band, close enough to MATCH
    assert!(result.is_viable);
    assert!(result.details[0].delta < 0.0);
    assert!(result.score > 90);
}

#[test]
fn test_mixed_unit_datasets_compare_after_conversion() {
    // target recorded in ksi, candidate in MPa
    let target_ksi = 78.3;
    let target = PropertySet::from_iter([(
        "FTU_L",
        convert(target_ksi, Unit::Ksi, Unit::Megapascal).unwrap(),
    )]);
    let candidate = PropertySet::from_iter([("FTU_L", 540.0)]);
    let criteria = [SimilarityCriterion {
        tolerance: Some(0.05),
        ..criterion("FTU_L")
    }];
    let result = compute_similarity(&target, &candidate, &criteria);
    assert_eq!(result.details[0].status, PropertyStatus::Match);
    assert!(result.score >= 99);
}

#[test]
fn test_profile_toml_round_trip_through_scorer() {
    let profile = r#"
        [[criteria]]
        property_id = "FTU_L"
        weight = 1.0
        critical = true
        tolerance = 0.10

        [[criteria]]
        property_id = "density"
        weight = 0.25
        tolerance = 0.03
    "#;

    #[derive(serde::Deserialize)]
    struct Profile {
        criteria: Vec<SimilarityCriterion>,
    }

    let profile: Profile = toml::from_str(profile).unwrap();
    validate_criteria(&profile.criteria).unwrap();

    let target = PropertySet::from_iter([("FTU_L", 540.0), ("density", 1.58)]);
    let candidate = PropertySet::from_iter([("FTU_L", 536.0), ("density", 1.59)]);
    let result = compute_similarity(&target, &candidate, &profile.criteria);
    assert!(result.is_viable);
    assert_eq!(result.details.len(), 2);
    assert!(result.details.iter().all(|d| d.status == PropertyStatus::Match));
}

#[test]
fn test_result_json_shape_is_stable() {
    let target = PropertySet::from_iter([("FTU_L", 100.0), ("E1", 135.0)]);
    let candidate = PropertySet::from_iter([("FTU_L", 95.0)]);
    let criteria = [
        SimilarityCriterion {
            tolerance: Some(0.06),
            ..criterion("FTU_L")
        },
        criterion("E1"),
    ];
    let result = compute_similarity(&target, &candidate, &criteria);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["score"], 90);
    assert_eq!(json["is_viable"], true);
    assert_eq!(json["details"][0]["status"], "MARGINAL");
    assert_eq!(json["details"][1]["status"], "MISSING");

    let parsed: SimilarityResult = serde_json::from_value(json).unwrap();
    assert_eq!(parsed, result);
}

#[test]
fn test_config_trims_result_sections() {
    let values = [100.0, 160.0, 100.0, 160.0, 100.0, 160.0];
    let full = compute_stats(&values);
    assert!(full.cv > HIGH_CV_THRESHOLD);
    assert!(full.warnings.iter().any(|w| w.contains("variation")));

    let config = StatsConfig {
        calculate_basic: false,
        calculate_b_basis: true,
        calculate_a_basis: false,
    };
    let trimmed = compute_stats_with(&values, &config);
    assert_eq!(trimmed.cv, 0.0);
    assert!(trimmed.b_basis.is_some());
    assert!(trimmed.a_basis.is_none());
    assert!(trimmed.warnings.iter().all(|w| !w.contains("variation")));
    assert_eq!(trimmed.mean, full.mean);
    assert_eq!(trimmed.std_dev, full.std_dev);
}

#[test]
fn test_null_readings_flow_through_dataset_path() {
    let readings = [Some(540.0), None, Some(543.5), Some(538.2), None];
    let result = compute_stats_opt(&readings);
    assert_eq!(result.n, 3);
    assert_eq!(result, compute_stats(&[540.0, 543.5, 538.2]));
}

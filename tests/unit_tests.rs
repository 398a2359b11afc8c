// Unit tests for the Naviriti API

use naviriti_api::core::{analyze_survey, validate_submission, validate_survey, Predictor, StaticPredictor};
use naviriti_api::models::requests::BudgetConstraintsRequest;
use naviriti_api::models::{
    AnalyzeSurveyRequest, BudgetConstraints, LocationPreference, MigrationWillingness,
    ParentPreference, StoredPreference, SubmitPreferencesRequest, Weight,
};
use std::collections::BTreeMap;

fn valid_submission() -> SubmitPreferencesRequest {
    SubmitPreferencesRequest {
        parent_id: Some("parent-42".to_string()),
        financial_stability_weight: 0.5,
        job_security_weight: 0.5,
        prestige_weight: 0.5,
        location_preference: "national".to_string(),
        migration_willingness: "conditional".to_string(),
        budget_constraints: BudgetConstraintsRequest {
            max_tuition_per_year: 0.0,
        },
        unacceptable_professions: vec![],
        acceptable_professions: vec![],
        parent_risk_tolerance: 0.5,
        weight_on_parent_layer: 0.5,
    }
}

fn stored(preference: ParentPreference) -> StoredPreference {
    StoredPreference {
        id: uuid::Uuid::new_v4(),
        preference,
        timestamp: chrono::Utc::now(),
    }
}

#[test]
fn test_weight_accepts_closed_interval() {
    assert!(Weight::new(0.0).is_ok());
    assert!(Weight::new(0.5).is_ok());
    assert!(Weight::new(1.0).is_ok());
}

#[test]
fn test_weight_rejects_outside_interval() {
    assert!(Weight::new(-0.001).is_err());
    assert!(Weight::new(1.001).is_err());
    assert!(Weight::new(f64::NAN).is_err());
    assert!(Weight::new(f64::NEG_INFINITY).is_err());
}

#[test]
fn test_valid_submission_passes() {
    let record = validate_submission(&valid_submission()).unwrap();
    assert_eq!(record.parent_id.as_deref(), Some("parent-42"));
    assert_eq!(record.location_preference, LocationPreference::National);
    assert_eq!(record.migration_willingness, MigrationWillingness::Conditional);
}

#[test]
fn test_out_of_range_weight_rejected_and_named() {
    let mut req = valid_submission();
    req.job_security_weight = 1.5;

    let errors = validate_submission(&req).unwrap_err();
    assert!(errors.contains_key("job_security_weight"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_every_location_variant_accepted() {
    for variant in ["local", "national", "international", "conditional"] {
        let mut req = valid_submission();
        req.location_preference = variant.to_string();
        assert!(validate_submission(&req).is_ok(), "rejected {}", variant);
    }
}

#[test]
fn test_every_migration_variant_accepted() {
    for variant in ["yes", "no", "conditional"] {
        let mut req = valid_submission();
        req.migration_willingness = variant.to_string();
        assert!(validate_submission(&req).is_ok(), "rejected {}", variant);
    }
}

#[test]
fn test_unknown_enumeration_rejected() {
    let mut req = valid_submission();
    req.location_preference = "regional".to_string();
    assert!(validate_submission(&req)
        .unwrap_err()
        .contains_key("location_preference"));

    let mut req = valid_submission();
    req.migration_willingness = "sometimes".to_string();
    assert!(validate_submission(&req)
        .unwrap_err()
        .contains_key("migration_willingness"));
}

#[test]
fn test_negative_tuition_rejected() {
    let mut req = valid_submission();
    req.budget_constraints.max_tuition_per_year = -100.0;
    assert!(validate_submission(&req)
        .unwrap_err()
        .contains_key("budget_constraints.max_tuition_per_year"));
}

#[test]
fn test_static_predictor_fixed_payload() {
    let record = validate_submission(&valid_submission()).unwrap();
    let prediction = StaticPredictor.predict(&stored(record));

    assert_eq!(prediction.score, 85);
    assert_eq!(prediction.recommended_path, "Software Engineering");
    assert_eq!(
        prediction.match_reason,
        "High alignment with financial stability and low risk tolerance."
    );
    assert_eq!(prediction.flags, vec!["Matches budget constraints"]);
}

#[test]
fn test_static_predictor_ignores_input() {
    let mut extreme = valid_submission();
    extreme.financial_stability_weight = 1.0;
    extreme.prestige_weight = 0.0;
    extreme.location_preference = "international".to_string();
    extreme.budget_constraints = BudgetConstraintsRequest {
        max_tuition_per_year: 250_000.0,
    };
    extreme.unacceptable_professions = vec!["politics".to_string()];

    let a = StaticPredictor.predict(&stored(validate_submission(&valid_submission()).unwrap()));
    let b = StaticPredictor.predict(&stored(validate_submission(&extreme).unwrap()));

    assert_eq!(a, b);
}

#[test]
fn test_predictor_is_object_safe() {
    // The swap-in point for a future scoring engine
    let predictor: Box<dyn Predictor> = Box::new(StaticPredictor);
    let record = stored(validate_submission(&valid_submission()).unwrap());
    assert_eq!(predictor.predict(&record).score, 85);
}

fn survey_request(sections: &[(&str, &[i64])]) -> AnalyzeSurveyRequest {
    let mut responses = BTreeMap::new();
    for (section, answers) in sections {
        let answers: BTreeMap<String, i64> = answers
            .iter()
            .enumerate()
            .map(|(idx, v)| (idx.to_string(), *v))
            .collect();
        responses.insert(section.to_string(), answers);
    }
    AnalyzeSurveyRequest {
        survey_id: None,
        source: None,
        responses,
        meta: None,
        timestamp: None,
    }
}

#[test]
fn test_survey_answers_must_be_likert() {
    let errors = validate_survey(&survey_request(&[("A", &[0, 3, 6])])).unwrap_err();
    assert!(errors.contains_key("responses.A.0"));
    assert!(errors.contains_key("responses.A.2"));
    assert!(!errors.contains_key("responses.A.1"));
}

#[test]
fn test_survey_section_scores() {
    let survey = validate_survey(&survey_request(&[("A", &[5, 5]), ("B", &[1, 1]), ("C", &[3])]))
        .unwrap();
    let analysis = analyze_survey(&survey);

    assert_eq!(analysis.section_scores["A"], 1.0);
    assert_eq!(analysis.section_scores["B"], 0.0);
    assert!((analysis.section_scores["C"] - 0.5).abs() < 1e-9);
    assert_eq!(analysis.dominant_section, "A");
    assert!((analysis.overall_influence - 0.5).abs() < 1e-9);
}

#[test]
fn test_weight_wire_roundtrip() {
    let record = validate_submission(&valid_submission()).unwrap();
    let json = serde_json::to_string(&record).unwrap();
    let back: ParentPreference = serde_json::from_str(&json).unwrap();
    assert_eq!(record, back);
}

#[test]
fn test_budget_constraints_shape() {
    let constraints = BudgetConstraints {
        max_tuition_per_year: 30_000.0,
    };
    let json = serde_json::to_value(&constraints).unwrap();
    assert_eq!(json["max_tuition_per_year"], 30_000.0);
}

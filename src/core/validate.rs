use crate::models::{
    BudgetConstraints, LocationPreference, MigrationWillingness, ParentPreference,
    SubmitPreferencesRequest, Weight,
};
use std::collections::BTreeMap;

/// Field name mapped to a human-readable rejection message
pub type FieldErrors = BTreeMap<String, String>;

/// Validate a raw submission and narrow it into a typed record.
///
/// Pure check: collects every failing field instead of stopping at the
/// first, so the caller can report the full map. Nothing is persisted on
/// failure.
pub fn validate_submission(
    req: &SubmitPreferencesRequest,
) -> Result<ParentPreference, FieldErrors> {
    let mut errors = FieldErrors::new();

    let financial_stability_weight =
        check_weight(&mut errors, "financial_stability_weight", req.financial_stability_weight);
    let job_security_weight =
        check_weight(&mut errors, "job_security_weight", req.job_security_weight);
    let prestige_weight = check_weight(&mut errors, "prestige_weight", req.prestige_weight);
    let parent_risk_tolerance =
        check_weight(&mut errors, "parent_risk_tolerance", req.parent_risk_tolerance);
    let weight_on_parent_layer =
        check_weight(&mut errors, "weight_on_parent_layer", req.weight_on_parent_layer);

    let location_preference = match req.location_preference.parse::<LocationPreference>() {
        Ok(v) => Some(v),
        Err(()) => {
            errors.insert(
                "location_preference".to_string(),
                format!(
                    "must be one of: {}",
                    LocationPreference::VARIANTS.join(", ")
                ),
            );
            None
        }
    };

    let migration_willingness = match req.migration_willingness.parse::<MigrationWillingness>() {
        Ok(v) => Some(v),
        Err(()) => {
            errors.insert(
                "migration_willingness".to_string(),
                format!(
                    "must be one of: {}",
                    MigrationWillingness::VARIANTS.join(", ")
                ),
            );
            None
        }
    };

    let tuition = req.budget_constraints.max_tuition_per_year;
    if !tuition.is_finite() || tuition < 0.0 {
        errors.insert(
            "budget_constraints.max_tuition_per_year".to_string(),
            "must be a non-negative number".to_string(),
        );
    }

    // Every Option is Some exactly when its field recorded no error
    match (
        financial_stability_weight,
        job_security_weight,
        prestige_weight,
        parent_risk_tolerance,
        weight_on_parent_layer,
        location_preference,
        migration_willingness,
    ) {
        (
            Some(financial_stability_weight),
            Some(job_security_weight),
            Some(prestige_weight),
            Some(parent_risk_tolerance),
            Some(weight_on_parent_layer),
            Some(location_preference),
            Some(migration_willingness),
        ) if errors.is_empty() => Ok(ParentPreference {
            parent_id: req.parent_id.clone(),
            financial_stability_weight,
            job_security_weight,
            prestige_weight,
            location_preference,
            migration_willingness,
            budget_constraints: BudgetConstraints {
                max_tuition_per_year: tuition,
            },
            unacceptable_professions: req.unacceptable_professions.clone(),
            acceptable_professions: req.acceptable_professions.clone(),
            parent_risk_tolerance,
            weight_on_parent_layer,
        }),
        _ => Err(errors),
    }
}

fn check_weight(errors: &mut FieldErrors, field: &str, value: f64) -> Option<Weight> {
    match Weight::new(value) {
        Ok(w) => Some(w),
        Err(_) => {
            errors.insert(field.to_string(), "must be between 0.00 and 1.00".to_string());
            None
        }
    }
}

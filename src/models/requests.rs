use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Raw preference submission as it arrives on the wire.
///
/// Weights and enumerations are kept loose here so the validator can
/// report every bad field by name instead of failing on the first one
/// during deserialization. `core::validate` narrows this into a typed
/// `ParentPreference`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPreferencesRequest {
    #[serde(default)]
    pub parent_id: Option<String>,
    pub financial_stability_weight: f64,
    pub job_security_weight: f64,
    pub prestige_weight: f64,
    pub location_preference: String,
    pub migration_willingness: String,
    pub budget_constraints: BudgetConstraintsRequest,
    #[serde(default)]
    pub unacceptable_professions: Vec<String>,
    #[serde(default)]
    pub acceptable_professions: Vec<String>,
    pub parent_risk_tolerance: f64,
    pub weight_on_parent_layer: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetConstraintsRequest {
    pub max_tuition_per_year: f64,
}

/// Query parameters for listing stored preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPreferencesQuery {
    #[serde(alias = "parentId")]
    pub parent_id: Option<String>,
    #[serde(default = "default_list_limit")]
    pub limit: u16,
    #[serde(default)]
    pub offset: u32,
}

fn default_list_limit() -> u16 {
    20
}

/// Societal survey submission as sent by the questionnaire page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeSurveyRequest {
    #[serde(default)]
    pub survey_id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    pub responses: BTreeMap<String, BTreeMap<String, i64>>,
    #[serde(default)]
    pub meta: Option<SurveyMeta>,
    #[serde(default)]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

/// Client-side bookkeeping attached to a survey; stored verbatim, unused
/// by the analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyMeta {
    #[serde(default)]
    pub sections_count: Option<u32>,
    #[serde(default)]
    pub total_answered: Option<u32>,
}

/// Login credentials forwarded to the auth collaborator
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Signup payload, with or without the OTP flow
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 4, max = 8))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestPasswordResetRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 4, max = 8))]
    pub otp: String,
    #[validate(length(min = 8))]
    #[serde(alias = "newPassword")]
    pub new_password: String,
}

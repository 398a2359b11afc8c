use crate::models::domain::{Prediction, StoredPreference, SurveyAnalysis};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response for a successful preference submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPreferencesResponse {
    pub status: String,
    pub message: String,
    pub prediction: Prediction,
    pub saved_id: uuid::Uuid,
}

/// Response for listing stored preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPreferencesResponse {
    pub preferences: Vec<StoredPreference>,
    pub count: usize,
}

/// Response for a societal survey analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeSurveyResponse {
    pub status: String,
    pub message: String,
    pub analysis: SurveyAnalysis,
    pub saved_id: uuid::Uuid,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Validation error response with per-field detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub message: String,
    pub fields: BTreeMap<String, String>,
    pub status_code: u16,
}

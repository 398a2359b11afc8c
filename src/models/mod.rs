// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BudgetConstraints, LocationPreference, MigrationWillingness, ParentPreference, Prediction,
    SocietalSurvey, StoredPreference, SurveyAnalysis, Weight, WeightOutOfRange,
};
pub use requests::{
    AnalyzeSurveyRequest, ListPreferencesQuery, LoginRequest, RegisterRequest,
    RequestPasswordResetRequest, ResetPasswordRequest, SubmitPreferencesRequest, SurveyMeta,
    VerifyOtpRequest,
};
pub use responses::{
    AnalyzeSurveyResponse, ErrorResponse, HealthResponse, ListPreferencesResponse,
    SubmitPreferencesResponse, ValidationErrorResponse,
};

//! Naviriti API - backend preference and guidance service
//!
//! This library backs the Naviriti career-guidance app: it validates and
//! persists parental career-preference submissions and societal-influence
//! surveys, returns a recommendation payload through a pluggable predictor
//! strategy, and proxies auth flows to an external token-issuing service.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{validate_submission, Predictor, StaticPredictor};
pub use crate::models::{
    ParentPreference, Prediction, SocietalSurvey, StoredPreference, SubmitPreferencesRequest,
    SurveyAnalysis, Weight,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let weight = Weight::new(0.5).unwrap();
        assert_eq!(weight.get(), 0.5);
    }
}

use crate::models::{Prediction, StoredPreference};

/// Strategy for producing a recommendation from a saved preference record.
///
/// Held as a trait object in application state so a real scoring engine
/// can replace the static stub without any handler changes.
pub trait Predictor: Send + Sync {
    fn predict(&self, record: &StoredPreference) -> Prediction;
}

/// Placeholder predictor returning a fixed recommendation.
///
/// The payload is intentionally independent of the input record; callers
/// rely on the shape of `Prediction`, not on these values.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticPredictor;

impl Predictor for StaticPredictor {
    fn predict(&self, _record: &StoredPreference) -> Prediction {
        Prediction {
            score: 85,
            recommended_path: "Software Engineering".to_string(),
            match_reason: "High alignment with financial stability and low risk tolerance."
                .to_string(),
            flags: vec!["Matches budget constraints".to_string()],
        }
    }
}

// Core logic exports
pub mod predictor;
pub mod societal;
pub mod validate;

pub use predictor::{Predictor, StaticPredictor};
pub use societal::{analyze_survey, validate_survey};
pub use validate::{validate_submission, FieldErrors};

use actix_web::{web, HttpResponse, Responder};
use crate::core::{analyze_survey, validate_survey};
use crate::models::{
    AnalyzeSurveyRequest, AnalyzeSurveyResponse, ErrorResponse, ValidationErrorResponse,
};
use crate::routes::AppState;

/// Configure societal survey routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/societal/analyze", web::post().to(analyze));
}

/// Societal survey analysis endpoint
///
/// POST /api/societal/analyze
///
/// Validates the Likert answers, persists the raw survey, and returns the
/// computed influence analysis.
async fn analyze(
    state: web::Data<AppState>,
    req: web::Json<AnalyzeSurveyRequest>,
) -> impl Responder {
    let survey = match validate_survey(&req) {
        Ok(survey) => survey,
        Err(fields) => {
            tracing::info!("Validation failed for survey submission: {:?}", fields);
            return HttpResponse::BadRequest().json(ValidationErrorResponse {
                error: "Validation failed".to_string(),
                message: "One or more answers are invalid".to_string(),
                fields,
                status_code: 400,
            });
        }
    };

    let saved_id = match state.store.save_survey(&survey).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to save societal survey: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Server error processing request".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let analysis = analyze_survey(&survey);

    tracing::info!(
        "Analyzed societal survey {} ({} sections, dominant: {})",
        saved_id,
        analysis.section_scores.len(),
        analysis.dominant_section
    );

    HttpResponse::Ok().json(AnalyzeSurveyResponse {
        status: "success".to_string(),
        message: "Survey saved and analyzed.".to_string(),
        analysis,
        saved_id,
    })
}

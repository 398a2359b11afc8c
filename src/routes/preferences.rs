use actix_web::{web, HttpResponse, Responder};
use crate::core::validate_submission;
use crate::models::{
    ErrorResponse, HealthResponse, ListPreferencesQuery, ListPreferencesResponse,
    SubmitPreferencesRequest, SubmitPreferencesResponse, ValidationErrorResponse,
};
use crate::routes::AppState;
use crate::services::StoreError;

/// Configure preference and health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/parent/preferences", web::post().to(submit_preferences))
        .route("/parent/preferences", web::get().to(list_preferences))
        .route("/parent/preferences/{id}", web::get().to(get_preference));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Preference submission endpoint
///
/// POST /api/parent/preferences
///
/// Validates the submission, persists it, and responds with the stored id
/// and the prediction payload. Out-of-range or mistyped fields are
/// rejected with a field-level error map and nothing is persisted.
async fn submit_preferences(
    state: web::Data<AppState>,
    req: web::Json<SubmitPreferencesRequest>,
) -> impl Responder {
    let preference = match validate_submission(&req) {
        Ok(preference) => preference,
        Err(fields) => {
            tracing::info!("Validation failed for preference submission: {:?}", fields);
            return HttpResponse::BadRequest().json(ValidationErrorResponse {
                error: "Validation failed".to_string(),
                message: "One or more fields are invalid".to_string(),
                fields,
                status_code: 400,
            });
        }
    };

    let saved = match state.store.save_preference(&preference).await {
        Ok(saved) => saved,
        Err(e) => {
            tracing::error!("Failed to save preference record: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Server error processing request".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let prediction = state.predictor.predict(&saved);

    tracing::info!(
        "Saved preference record {} (parent: {:?})",
        saved.id,
        saved.preference.parent_id
    );

    HttpResponse::Created().json(SubmitPreferencesResponse {
        status: "success".to_string(),
        message: "Preferences saved and analyzed.".to_string(),
        prediction,
        saved_id: saved.id,
    })
}

/// Fetch a single stored preference record
///
/// GET /api/parent/preferences/{id}
async fn get_preference(
    state: web::Data<AppState>,
    path: web::Path<uuid::Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    match state.store.get_preference(id).await {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(StoreError::NotFound(_)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: format!("No preference record with id {}", id),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch preference {}: {}", id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Server error processing request".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// List stored preference records, newest first
///
/// GET /api/parent/preferences?parentId={id}&limit={n}&offset={n}
async fn list_preferences(
    state: web::Data<AppState>,
    query: web::Query<ListPreferencesQuery>,
) -> impl Responder {
    // Cap limit at 100 to prevent excessive queries
    let limit = query.limit.min(100) as usize;

    match state
        .store
        .list_preferences(query.parent_id.as_deref(), limit, query.offset as usize)
        .await
    {
        Ok(preferences) => {
            let count = preferences.len();
            HttpResponse::Ok().json(ListPreferencesResponse { preferences, count })
        }
        Err(e) => {
            tracing::error!("Failed to list preferences: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Server error processing request".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

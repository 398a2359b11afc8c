use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    ErrorResponse, LoginRequest, RegisterRequest, RequestPasswordResetRequest,
    ResetPasswordRequest, VerifyOtpRequest,
};
use crate::routes::AppState;
use crate::services::AuthError;

/// Configure auth proxy routes.
///
/// Every handler delegates to the external token-issuing collaborator;
/// this service holds no account state of its own.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/register-otp", web::post().to(register_otp))
        .route("/register-no-otp", web::post().to(register_no_otp))
        .route("/verify-otp", web::post().to(verify_otp))
        .route("/request-password-reset", web::post().to(request_password_reset))
        .route("/reset-password", web::post().to(reset_password))
        .route("/test-token", web::post().to(test_token))
        .route("/me", web::get().to(me))
        .route("/logout", web::post().to(logout));
}

/// Pull the bearer token out of the Authorization header
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn auth_failure(err: AuthError) -> HttpResponse {
    match err {
        AuthError::Unauthorized | AuthError::InvalidToken(_) => {
            HttpResponse::Unauthorized().json(ErrorResponse {
                error: "Unauthorized".to_string(),
                message: err.to_string(),
                status_code: 401,
            })
        }
        AuthError::ApiError { status, ref message } if (400..500).contains(&status) => {
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Auth request rejected".to_string(),
                message: message.clone(),
                status_code: 400,
            })
        }
        other => {
            tracing::error!("Auth collaborator failure: {}", other);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Auth service unavailable".to_string(),
                message: other.to_string(),
                status_code: 502,
            })
        }
    }
}

fn missing_token() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse {
        error: "Unauthorized".to_string(),
        message: "Missing bearer token".to_string(),
        status_code: 401,
    })
}

/// POST /api/auth/login
async fn login(state: web::Data<AppState>, req: web::Json<LoginRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.auth.issue_token(&req.email, &req.password).await {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => auth_failure(e),
    }
}

/// POST /api/auth/register-otp
async fn register_otp(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state
        .auth
        .register_otp(&req.email, &req.password, req.name.as_deref())
        .await
    {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => auth_failure(e),
    }
}

/// POST /api/auth/register-no-otp
async fn register_no_otp(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state
        .auth
        .register(&req.email, &req.password, req.name.as_deref())
        .await
    {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => auth_failure(e),
    }
}

/// POST /api/auth/verify-otp
async fn verify_otp(
    state: web::Data<AppState>,
    req: web::Json<VerifyOtpRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.auth.verify_otp(&req.email, &req.otp).await {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => auth_failure(e),
    }
}

/// POST /api/auth/request-password-reset
async fn request_password_reset(
    state: web::Data<AppState>,
    req: web::Json<RequestPasswordResetRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.auth.request_password_reset(&req.email).await {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => auth_failure(e),
    }
}

/// POST /api/auth/reset-password
async fn reset_password(
    state: web::Data<AppState>,
    req: web::Json<ResetPasswordRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state
        .auth
        .reset_password(&req.email, &req.otp, &req.new_password)
        .await
    {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => auth_failure(e),
    }
}

/// POST /api/auth/test-token
///
/// Local token check: verifies the signature and expiry without a
/// collaborator round-trip.
async fn test_token(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let token = match bearer_token(&http_req) {
        Some(token) => token,
        None => return missing_token(),
    };

    match state.auth.validate_token(token) {
        Ok(claims) => HttpResponse::Ok().json(claims),
        Err(e) => auth_failure(e),
    }
}

/// GET /api/auth/me
async fn me(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let token = match bearer_token(&http_req) {
        Some(token) => token,
        None => return missing_token(),
    };

    match state.auth.fetch_profile(token).await {
        Ok(session) => HttpResponse::Ok().json(session),
        Err(e) => auth_failure(e),
    }
}

/// POST /api/auth/logout
async fn logout(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let token = match bearer_token(&http_req) {
        Some(token) => token,
        None => return missing_token(),
    };

    match state.auth.revoke_token(token).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "message": "Logged out" })),
        Err(e) => auth_failure(e),
    }
}

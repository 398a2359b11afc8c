use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use reqwest::{Client, Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the auth collaborator
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Auth service returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Unauthorized: invalid credentials or token")]
    Unauthorized,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Session payload returned by the collaborator.
///
/// `token` is absent for flows that only kick something off (OTP mail,
/// password-reset request).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Claims carried by the collaborator's bearer tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: usize,
    #[serde(default)]
    pub iat: Option<usize>,
}

/// Client for the external bearer-token issuing service.
///
/// The collaborator owns accounts, OTP delivery, and password resets; this
/// service only forwards requests and validates the HS256 tokens the
/// collaborator signs with the shared secret.
pub struct AuthClient {
    base_url: String,
    service_key: String,
    client: Client,
    decoding_key: DecodingKey,
}

impl AuthClient {
    /// Create a new auth client
    pub fn new(base_url: String, service_key: String, jwt_secret: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            service_key,
            client,
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }

    /// Exchange credentials for a bearer token
    pub async fn issue_token(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        self.call(
            Method::POST,
            "/v1/sessions",
            Some(json!({ "email": email, "password": password })),
            None,
        )
        .await
    }

    /// Create an account without the OTP flow; returns a session token
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthSession, AuthError> {
        self.call(
            Method::POST,
            "/v1/accounts",
            Some(json!({ "email": email, "password": password, "name": name })),
            None,
        )
        .await
    }

    /// Start the OTP signup flow; the collaborator mails the code
    pub async fn register_otp(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<AuthSession, AuthError> {
        self.call(
            Method::POST,
            "/v1/accounts/otp",
            Some(json!({ "email": email, "password": password, "name": name })),
            None,
        )
        .await
    }

    /// Complete the OTP signup flow
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<AuthSession, AuthError> {
        self.call(
            Method::POST,
            "/v1/otp/verify",
            Some(json!({ "email": email, "otp": otp })),
            None,
        )
        .await
    }

    /// Ask the collaborator to mail a password-reset code
    pub async fn request_password_reset(&self, email: &str) -> Result<AuthSession, AuthError> {
        self.call(
            Method::POST,
            "/v1/password-resets",
            Some(json!({ "email": email })),
            None,
        )
        .await
    }

    /// Complete a password reset with the mailed code
    pub async fn reset_password(
        &self,
        email: &str,
        otp: &str,
        new_password: &str,
    ) -> Result<AuthSession, AuthError> {
        self.call(
            Method::POST,
            "/v1/password-resets/confirm",
            Some(json!({ "email": email, "otp": otp, "new_password": new_password })),
            None,
        )
        .await
    }

    /// Fetch the profile behind a bearer token
    pub async fn fetch_profile(&self, token: &str) -> Result<AuthSession, AuthError> {
        self.call(Method::GET, "/v1/me", None, Some(token)).await
    }

    /// Revoke a bearer token
    pub async fn revoke_token(&self, token: &str) -> Result<(), AuthError> {
        self.call(Method::DELETE, "/v1/sessions", None, Some(token))
            .await
            .map(|_| ())
    }

    /// Validate a bearer token locally.
    ///
    /// Decodes the collaborator's HS256 signature with the shared secret
    /// and enforces expiry; no network round-trip.
    pub fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> Result<AuthSession, AuthError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);

        tracing::debug!("Auth collaborator call: {} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header("X-Auth-Key", &self.service_key);

        if let Some(token) = bearer {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AuthError::Unauthorized);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<AuthSession>()
            .await
            .map_err(|e| AuthError::InvalidResponse(format!("Failed to parse session: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn client(base_url: String) -> AuthClient {
        AuthClient::new(base_url, "service-key".to_string(), SECRET)
    }

    fn mint_token(secret: &str, exp_offset_secs: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = TokenClaims {
            sub: "user-1".to_string(),
            email: Some("parent@example.com".to_string()),
            exp: (now + exp_offset_secs).max(0) as usize,
            iat: Some(now as usize),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_validate_token_accepts_shared_secret() {
        let client = client("http://localhost".to_string());
        let token = mint_token(SECRET, 3600);

        let claims = client.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email.as_deref(), Some("parent@example.com"));
    }

    #[test]
    fn test_validate_token_rejects_wrong_secret() {
        let client = client("http://localhost".to_string());
        let token = mint_token("other-secret", 3600);

        assert!(matches!(
            client.validate_token(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_validate_token_rejects_expired() {
        let client = client("http://localhost".to_string());
        let token = mint_token(SECRET, -3600);

        assert!(client.validate_token(&token).is_err());
    }

    #[tokio::test]
    async fn test_issue_token_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/sessions")
            .match_header("x-auth-key", "service-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token":"abc123","user":{"email":"parent@example.com"}}"#)
            .create_async()
            .await;

        let client = client(server.url());
        let session = client
            .issue_token("parent@example.com", "password123")
            .await
            .unwrap();

        assert_eq!(session.token.as_deref(), Some("abc123"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_issue_token_bad_credentials() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/sessions")
            .with_status(401)
            .create_async()
            .await;

        let client = client(server.url());
        let result = client.issue_token("parent@example.com", "wrong").await;

        assert!(matches!(result, Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_collaborator_error_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/password-resets")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let client = client(server.url());
        let result = client.request_password_reset("parent@example.com").await;

        match result {
            Err(AuthError::ApiError { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_revoke_token_sends_bearer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/v1/sessions")
            .match_header("authorization", "Bearer abc123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"revoked"}"#)
            .create_async()
            .await;

        let client = client(server.url());
        client.revoke_token("abc123").await.unwrap();
        mock.assert_async().await;
    }
}

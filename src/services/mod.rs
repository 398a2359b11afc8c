// Service exports
pub mod auth;
pub mod postgres;

pub use auth::{AuthClient, AuthError, AuthSession, TokenClaims};
pub use postgres::{PreferenceStore, StoreError};

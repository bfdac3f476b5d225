//! Bearer token authentication.
//!
//! Handlers that need a caller take an [`AuthUser`] argument; handlers
//! that don't simply omit it, so public and protected endpoints can share
//! a path (`GET /categorys` is public, `POST /categorys` is not).

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::entities::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller of a request.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// Rejects with `401 Unauthorized` (and `WWW-Authenticate: Bearer`) if the
/// header is missing or malformed, or the token is unknown, revoked or
/// owned by an inactive user.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn user_id(&self) -> i64 {
        self.0.user_id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthBearer(token) = AuthBearer::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                AppError::unauthorized(
                    "Authentication credentials were not provided.",
                    json!({"reason": "Authorization header is missing or invalid"}),
                )
            })?;

        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::unauthorized(
                "Invalid token header. No credentials provided.",
                json!({"reason": "Empty bearer token"}),
            ));
        }

        let identity = state.auth_service.authenticate(token).await?;
        Ok(AuthUser(identity))
    }
}

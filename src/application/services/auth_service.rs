//! Authentication service for API token validation.

use hmac::{Hmac, Mac};
use rand::{Rng, distr::Alphanumeric};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::Identity;
use crate::domain::repositories::{ApiToken, TokenRepository};
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Length of freshly issued raw tokens.
pub const TOKEN_LENGTH: usize = 48;

/// Hashes a raw token with HMAC-SHA256 keyed by `signing_secret`.
///
/// Returns a 64-character lowercase hex-encoded MAC. The admin CLI and the
/// request path must use the same secret or issued tokens will never match.
pub fn hash_token(signing_secret: &str, token: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Generates a random alphanumeric token.
pub fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Service for authenticating API requests via Bearer tokens.
///
/// Only the HMAC of a token is stored. An attacker with read-only access to
/// the database cannot verify or forge tokens without the server-side secret.
pub struct AuthService<R: TokenRepository> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Resolves a raw token to the identity of its owner.
    ///
    /// Stamps `last_used_at` on success; a failure to stamp is logged and
    /// does not fail the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown, revoked or
    /// belongs to an inactive user. Returns [`AppError::Internal`] on
    /// database errors.
    pub async fn authenticate(&self, token: &str) -> Result<Identity, AppError> {
        let token_hash = hash_token(&self.signing_secret, token);

        let Some(user_id) = self.repository.find_user_id(&token_hash).await? else {
            return Err(AppError::unauthorized(
                "Invalid token.",
                json!({"reason": "Invalid or revoked token"}),
            ));
        };

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!(user_id, error = %e, "Failed to stamp token usage");
        }

        Ok(Identity { user_id })
    }

    /// Issues a new token for `user_id`.
    ///
    /// Returns the stored record together with the raw token, which is not
    /// recoverable afterwards.
    pub async fn issue_token(
        &self,
        user_id: i64,
        name: &str,
    ) -> Result<(ApiToken, String), AppError> {
        let raw = generate_token();
        let token = self
            .repository
            .create_token(user_id, name, &hash_token(&self.signing_secret, &raw))
            .await?;

        tracing::info!(user_id, token_id = token.id, "API token issued");
        Ok((token, raw))
    }
}

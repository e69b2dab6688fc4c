//! Admin token hashing and validation.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::repositories::TokenRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const TOKEN_LEN: usize = 48;

/// Validates admin tokens presented at login and on every admin request.
///
/// Tokens are hashed with HMAC-SHA256 keyed by `signing_secret` before they
/// are stored or compared, so a read-only copy of the database is not enough
/// to log in.
pub struct AuthService<R: TokenRepository + ?Sized> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// `signing_secret` must match the value the operator CLI used when the
    /// tokens were created.
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Returns the 64-character lowercase hex HMAC of a raw token.
    pub fn hash_token(&self, token: &str) -> String {
        hash_token_with(&self.signing_secret, token)
    }

    /// Checks a raw token against the stored digests.
    ///
    /// On success the token's `last_used_at` is refreshed; a failure to do so
    /// is logged and does not fail authentication.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for unknown or revoked tokens and
    /// [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<(), AppError> {
        let token_hash = self.hash_token(token);

        if !self.repository.is_active(&token_hash).await? {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked token"}),
            ));
        }

        if let Err(e) = self.repository.touch(&token_hash).await {
            tracing::warn!(error = %e, "Failed to update token last_used_at");
        }

        Ok(())
    }
}

/// Hashes `token` with HMAC-SHA256 keyed by `secret`.
pub fn hash_token_with(secret: &str, token: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Generates a random 48-character alphanumeric token.
pub fn generate_token() -> String {
    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| TOKEN_CHARSET[rng.random_range(0..TOKEN_CHARSET.len())] as char)
        .collect()
}

/// Characters allowed in an admin token besides ASCII letters and digits.
///
/// Tokens travel verbatim in the `auth_token` cookie, so separators like
/// `;`, `,`, whitespace or quotes must never appear.
const TOKEN_EXTRA_CHARS: &[char] = &['-', '_', '.', '~'];

/// Checks that `token` is non-empty, at most 256 characters and cookie-safe.
///
/// # Examples
///
/// ```rust,ignore
/// assert!(validate_token_format("team-token_2024").is_ok());
/// assert!(validate_token_format("has space").is_err());
/// assert!(validate_token_format("a;b").is_err());
/// ```
pub fn validate_token_format(token: &str) -> Result<(), AppError> {
    if token.is_empty() || token.len() > 256 {
        return Err(AppError::bad_request(
            "Token must be 1 to 256 characters",
            json!({ "provided_length": token.len() }),
        ));
    }

    if !token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || TOKEN_EXTRA_CHARS.contains(&c))
    {
        return Err(AppError::bad_request(
            "Token can only contain letters, digits, '-', '_', '.' and '~'",
            json!({}),
        ));
    }

    Ok(())
}

//! Repository trait for admin access tokens.

use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Admin access token as stored in `api_tokens`.
///
/// Only the HMAC-SHA256 digest of the raw token is persisted.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiToken {
    pub id: i64,
    pub name: String,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl ApiToken {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}

/// How the operator CLI identifies a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenLookup {
    Id(i64),
    Name(String),
}

impl TokenLookup {
    /// Numeric input selects by id, anything else by exact name.
    pub fn parse(input: &str) -> Self {
        match input.parse::<i64>() {
            Ok(id) => TokenLookup::Id(id),
            Err(_) => TokenLookup::Name(input.to_string()),
        }
    }
}

/// Storage for hashed admin tokens.
///
/// The web panel only needs [`TokenRepository::is_active`] and
/// [`TokenRepository::touch`]; the rest backs the operator CLI.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Returns true if a non-revoked token with this digest exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn is_active(&self, token_hash: &str) -> Result<bool, AppError>;

    /// Records a successful login with this token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn touch(&self, token_hash: &str) -> Result<(), AppError>;

    /// Stores a new token digest under a human-readable name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors, including a
    /// duplicate digest.
    async fn insert(&self, name: &str, token_hash: &str) -> Result<ApiToken, AppError>;

    /// Lists all tokens, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<ApiToken>, AppError>;

    /// Finds a token by id or name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(&self, lookup: TokenLookup) -> Result<Option<ApiToken>, AppError>;

    /// Revokes a token. Returns false if it was missing or already revoked.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn revoke(&self, id: i64) -> Result<bool, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_parse() {
        assert_eq!(TokenLookup::parse("12"), TokenLookup::Id(12));
        assert_eq!(
            TokenLookup::parse("Ops laptop"),
            TokenLookup::Name("Ops laptop".to_string())
        );
    }
}

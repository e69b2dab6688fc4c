//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, SubscriberService};
use crate::domain::repositories::{SubscriberRepository, TokenRepository};

/// Shared state cloned into every request.
///
/// Services hold trait objects so the same router serves the PostgreSQL
/// repositories in production and in-memory ones in tests.
#[derive(Clone)]
pub struct AppState {
    pub subscriber_service: Arc<SubscriberService<dyn SubscriberRepository>>,
    pub auth_service: Arc<AuthService<dyn TokenRepository>>,
    /// Mount point of the admin site, e.g. `/admin`.
    pub admin_prefix: String,
}

impl AppState {
    pub fn new(
        subscriber_repository: Arc<dyn SubscriberRepository>,
        token_repository: Arc<dyn TokenRepository>,
        token_signing_secret: String,
        admin_prefix: impl Into<String>,
    ) -> Self {
        Self {
            subscriber_service: Arc::new(SubscriberService::new(subscriber_repository)),
            auth_service: Arc::new(AuthService::new(token_repository, token_signing_secret)),
            admin_prefix: admin_prefix.into(),
        }
    }

    /// Absolute path of an admin page, e.g. `admin_path("/login")`.
    pub fn admin_path(&self, path: &str) -> String {
        format!("{}{}", self.admin_prefix, path)
    }
}

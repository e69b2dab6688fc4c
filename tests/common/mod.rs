#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::json;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use subscriber_admin::application::services::auth_service::hash_token_with;
use subscriber_admin::domain::date_hierarchy::HierarchyLevel;
use subscriber_admin::domain::entities::{DailyCount, Subscriber};
use subscriber_admin::domain::repositories::{
    ApiToken, SubscriberFilter, SubscriberRepository, TokenLookup, TokenRepository,
};
use subscriber_admin::error::AppError;
use subscriber_admin::infrastructure::persistence::{
    MemorySubscriberRepository, PgSubscriberRepository, PgTokenRepository,
};
use subscriber_admin::routes::router;
use subscriber_admin::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const TEST_TOKEN: &str = "test-admin-token";
pub const ADMIN_PREFIX: &str = "/admin";

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// Accepts exactly one token, [`TEST_TOKEN`].
pub struct FixedTokenRepository {
    token_hash: String,
}

impl FixedTokenRepository {
    pub fn new() -> Self {
        Self {
            token_hash: hash_token_with(TEST_SECRET, TEST_TOKEN),
        }
    }
}

#[async_trait]
impl TokenRepository for FixedTokenRepository {
    async fn is_active(&self, token_hash: &str) -> Result<bool, AppError> {
        Ok(token_hash == self.token_hash)
    }

    async fn touch(&self, _token_hash: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn insert(&self, _name: &str, _token_hash: &str) -> Result<ApiToken, AppError> {
        unimplemented!("not used by handler tests")
    }

    async fn list(&self) -> Result<Vec<ApiToken>, AppError> {
        Ok(vec![])
    }

    async fn find(&self, _lookup: TokenLookup) -> Result<Option<ApiToken>, AppError> {
        Ok(None)
    }

    async fn revoke(&self, _id: i64) -> Result<bool, AppError> {
        Ok(false)
    }
}

/// Token store whose every query fails, as if the database were down.
pub struct UnavailableTokenRepository;

#[async_trait]
impl TokenRepository for UnavailableTokenRepository {
    async fn is_active(&self, _token_hash: &str) -> Result<bool, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn touch(&self, _token_hash: &str) -> Result<(), AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn insert(&self, _name: &str, _token_hash: &str) -> Result<ApiToken, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn list(&self) -> Result<Vec<ApiToken>, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn find(&self, _lookup: TokenLookup) -> Result<Option<ApiToken>, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn revoke(&self, _id: i64) -> Result<bool, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }
}

/// Subscriber store whose every query fails, as if the database were down.
pub struct UnavailableSubscriberRepository;

#[async_trait]
impl SubscriberRepository for UnavailableSubscriberRepository {
    async fn list(
        &self,
        _filter: SubscriberFilter,
        _offset: i64,
        _limit: i64,
    ) -> Result<Vec<Subscriber>, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn count(&self, _filter: SubscriberFilter) -> Result<i64, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn daily_counts(&self, _filter: SubscriberFilter) -> Result<Vec<DailyCount>, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn periods(
        &self,
        _filter: SubscriberFilter,
        _level: HierarchyLevel,
    ) -> Result<Vec<NaiveDate>, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::internal("Database error", json!({})))
    }
}

/// Valid session over a working subscriber store but an unreachable token store.
pub fn token_store_down_state() -> AppState {
    AppState::new(
        seeded_memory_repo(),
        Arc::new(UnavailableTokenRepository),
        TEST_SECRET.to_string(),
        ADMIN_PREFIX,
    )
}

/// Valid session over a subscriber store that fails every query.
pub fn subscriber_store_down_state() -> AppState {
    AppState::new(
        Arc::new(UnavailableSubscriberRepository),
        Arc::new(FixedTokenRepository::new()),
        TEST_SECRET.to_string(),
        ADMIN_PREFIX,
    )
}

/// State over an in-memory subscriber store; no database required.
pub fn memory_state(repo: Arc<MemorySubscriberRepository>) -> AppState {
    AppState::new(
        repo,
        Arc::new(FixedTokenRepository::new()),
        TEST_SECRET.to_string(),
        ADMIN_PREFIX,
    )
}

/// State over the PostgreSQL repositories.
pub fn create_test_state(pool: PgPool) -> AppState {
    let pool = Arc::new(pool);

    AppState::new(
        Arc::new(PgSubscriberRepository::new(pool.clone())),
        Arc::new(PgTokenRepository::new(pool)),
        TEST_SECRET.to_string(),
        ADMIN_PREFIX,
    )
}

/// Test server over the full router, without rate limiting.
pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

/// `Cookie` header value of a logged-in admin.
pub fn session_cookie() -> String {
    format!("auth_token={TEST_TOKEN}")
}

/// Memory store with the signups used across handler tests:
/// 2024-01-01 twice, 2024-01-02 once, 2023-12-31 once.
pub fn seeded_memory_repo() -> Arc<MemorySubscriberRepository> {
    let repo = MemorySubscriberRepository::new();
    repo.insert("a@example.com", at(2023, 12, 31, 22, 15)).unwrap();
    repo.insert("b@example.com", at(2024, 1, 1, 10, 0)).unwrap();
    repo.insert("c@example.com", at(2024, 1, 1, 23, 59)).unwrap();
    repo.insert("d@example.com", at(2024, 1, 2, 0, 0)).unwrap();
    Arc::new(repo)
}

pub async fn insert_subscriber(pool: &PgPool, email: &str, created_at: DateTime<Utc>) -> i64 {
    sqlx::query_scalar("INSERT INTO email_subscribers (email, created_at) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind(created_at)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_token(pool: &PgPool, name: &str, raw_token: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO api_tokens (name, token_hash) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(hash_token_with(TEST_SECRET, raw_token))
        .fetch_one(pool)
        .await
        .unwrap()
}

//! PostgreSQL implementation of the subscriber repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::date_hierarchy::HierarchyLevel;
use crate::domain::entities::{DailyCount, Subscriber};
use crate::domain::repositories::{SubscriberFilter, SubscriberRepository};
use crate::error::AppError;

/// PostgreSQL repository over the `email_subscribers` table.
///
/// Day truncation happens in UTC (`created_at AT TIME ZONE 'UTC'`) regardless
/// of the session time zone.
pub struct PgSubscriberRepository {
    pool: Arc<PgPool>,
}

impl PgSubscriberRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriberRepository for PgSubscriberRepository {
    async fn list(
        &self,
        filter: SubscriberFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Subscriber>, AppError> {
        let rows = sqlx::query_as::<_, Subscriber>(
            r#"
            SELECT id, email, created_at
            FROM email_subscribers
            WHERE ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at < $2)
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.from)
        .bind(filter.to)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn count(&self, filter: SubscriberFilter) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM email_subscribers
            WHERE ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at < $2)
            "#,
        )
        .bind(filter.from)
        .bind(filter.to)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn daily_counts(&self, filter: SubscriberFilter) -> Result<Vec<DailyCount>, AppError> {
        let rows = sqlx::query_as::<_, DailyCount>(
            r#"
            SELECT
                (created_at AT TIME ZONE 'UTC')::date AS date,
                COUNT(id) AS count
            FROM email_subscribers
            WHERE ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at < $2)
            GROUP BY 1
            ORDER BY 1 DESC
            "#,
        )
        .bind(filter.from)
        .bind(filter.to)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn periods(
        &self,
        filter: SubscriberFilter,
        level: HierarchyLevel,
    ) -> Result<Vec<NaiveDate>, AppError> {
        let periods = sqlx::query_scalar::<_, NaiveDate>(
            r#"
            SELECT DISTINCT date_trunc($3, created_at AT TIME ZONE 'UTC')::date AS period
            FROM email_subscribers
            WHERE ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at < $2)
            ORDER BY period
            "#,
        )
        .bind(filter.from)
        .bind(filter.to)
        .bind(level.as_trunc_unit())
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(periods)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}

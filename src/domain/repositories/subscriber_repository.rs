//! Repository trait for reading subscribers and their signup statistics.

use crate::domain::date_hierarchy::{DateHierarchy, HierarchyLevel};
use crate::domain::entities::{DailyCount, Subscriber};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

/// Signup-time window applied to subscriber queries.
///
/// `from` is inclusive and `to` is exclusive. An empty filter selects every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscriberFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl SubscriberFilter {
    /// Filter selecting the full, unfiltered record set.
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter selecting the records inside a date-hierarchy position.
    pub fn from_hierarchy(hierarchy: &DateHierarchy) -> Self {
        let (from, to) = hierarchy.range();
        Self { from, to }
    }

    /// Returns true if a record created at `created_at` passes the filter.
    pub fn matches(&self, created_at: DateTime<Utc>) -> bool {
        self.from.is_none_or(|from| created_at >= from) && self.to.is_none_or(|to| created_at < to)
    }
}

/// Read-only access to subscriber records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSubscriberRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemorySubscriberRepository`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_subscriber.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    /// Lists subscribers newest first (`created_at DESC, id DESC`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(
        &self,
        filter: SubscriberFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Subscriber>, AppError>;

    /// Counts subscribers matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, filter: SubscriberFilter) -> Result<i64, AppError>;

    /// Counts signups per UTC calendar day, most recent day first.
    ///
    /// One entry per distinct day among the matching records; the counts sum
    /// to [`SubscriberRepository::count`] for the same filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn daily_counts(&self, filter: SubscriberFilter) -> Result<Vec<DailyCount>, AppError>;

    /// Lists the distinct periods at `level` containing matching records, oldest first.
    ///
    /// Each period is represented by its first day (Jan 1st for years, the 1st
    /// for months).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn periods(
        &self,
        filter: SubscriberFilter,
        level: HierarchyLevel,
    ) -> Result<Vec<NaiveDate>, AppError>;

    /// Verifies the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}

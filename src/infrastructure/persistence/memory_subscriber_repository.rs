//! In-memory implementation of the subscriber repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::{RwLock, RwLockReadGuard};

use crate::domain::date_hierarchy::HierarchyLevel;
use crate::domain::entities::{DailyCount, Subscriber, aggregate_daily};
use crate::domain::repositories::{SubscriberFilter, SubscriberRepository};
use crate::error::AppError;

/// Subscriber store held in process memory.
///
/// Aggregates with [`aggregate_daily`] instead of SQL. Used by handler tests
/// that run without PostgreSQL.
#[derive(Default)]
pub struct MemorySubscriberRepository {
    records: RwLock<Vec<Subscriber>>,
}

impl MemorySubscriberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `records`.
    pub fn with_records(records: Vec<Subscriber>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Adds a record with the next free id and returns it.
    pub fn insert(
        &self,
        email: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Subscriber, AppError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let subscriber = Subscriber::new(id, email, created_at);
        records.push(subscriber.clone());
        Ok(subscriber)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Subscriber>>, AppError> {
        self.records.read().map_err(|_| poisoned())
    }
}

fn poisoned() -> AppError {
    AppError::internal("Subscriber store lock poisoned", json!({}))
}

#[async_trait]
impl SubscriberRepository for MemorySubscriberRepository {
    async fn list(
        &self,
        filter: SubscriberFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Subscriber>, AppError> {
        let records = self.read()?;
        let mut matching: Vec<Subscriber> = records
            .iter()
            .filter(|r| filter.matches(r.created_at))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(matching
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self, filter: SubscriberFilter) -> Result<i64, AppError> {
        let records = self.read()?;
        Ok(records
            .iter()
            .filter(|r| filter.matches(r.created_at))
            .count() as i64)
    }

    async fn daily_counts(&self, filter: SubscriberFilter) -> Result<Vec<DailyCount>, AppError> {
        let records = self.read()?;
        Ok(aggregate_daily(
            records.iter().filter(|r| filter.matches(r.created_at)),
        ))
    }

    async fn periods(
        &self,
        filter: SubscriberFilter,
        level: HierarchyLevel,
    ) -> Result<Vec<NaiveDate>, AppError> {
        let records = self.read()?;
        let periods: BTreeSet<NaiveDate> = records
            .iter()
            .filter(|r| filter.matches(r.created_at))
            .map(|r| level.truncate(r.created_at.date_naive()))
            .collect();
        Ok(periods.into_iter().collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::date_hierarchy::DateHierarchy;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn seeded() -> MemorySubscriberRepository {
        let repo = MemorySubscriberRepository::new();
        repo.insert("a@example.com", at(2023, 12, 31, 9)).unwrap();
        repo.insert("b@example.com", at(2024, 1, 1, 10)).unwrap();
        repo.insert("c@example.com", at(2024, 1, 1, 23)).unwrap();
        repo.insert("d@example.com", at(2024, 1, 2, 5)).unwrap();
        repo
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = MemorySubscriberRepository::new();
        let first = repo.insert("a@example.com", at(2024, 1, 1, 0)).unwrap();
        let second = repo.insert("b@example.com", at(2024, 1, 1, 0)).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_paginated() {
        let repo = seeded();

        let page = repo.list(SubscriberFilter::all(), 1, 2).await.unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].email, "c@example.com");
        assert_eq!(page[1].email, "b@example.com");
    }

    #[tokio::test]
    async fn test_daily_counts_respect_filter() {
        let repo = seeded();
        let filter = SubscriberFilter::from_hierarchy(&DateHierarchy::Year(2024));

        let counts = repo.daily_counts(filter).await.unwrap();

        assert_eq!(counts.len(), 2);
        assert_eq!(counts.iter().map(|c| c.count).sum::<i64>(), 3);
        assert_eq!(repo.count(filter).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_periods_by_level() {
        let repo = seeded();

        let years = repo
            .periods(SubscriberFilter::all(), HierarchyLevel::Year)
            .await
            .unwrap();
        assert_eq!(
            years,
            vec![
                NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ]
        );

        let filter = SubscriberFilter::from_hierarchy(&DateHierarchy::Month(2024, 1));
        let days = repo.periods(filter, HierarchyLevel::Day).await.unwrap();
        assert_eq!(days.len(), 2);
    }
}

mod common;

use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;
use subscriber_admin::domain::date_hierarchy::{DateHierarchy, HierarchyLevel};
use subscriber_admin::domain::entities::{DailyCount, aggregate_daily};
use subscriber_admin::domain::repositories::{SubscriberFilter, SubscriberRepository};
use subscriber_admin::infrastructure::persistence::PgSubscriberRepository;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed(pool: &PgPool) {
    common::insert_subscriber(pool, "a@example.com", common::at(2023, 12, 31, 22, 15)).await;
    common::insert_subscriber(pool, "b@example.com", common::at(2024, 1, 1, 10, 0)).await;
    common::insert_subscriber(pool, "c@example.com", common::at(2024, 1, 1, 23, 59)).await;
    common::insert_subscriber(pool, "d@example.com", common::at(2024, 1, 2, 0, 0)).await;
}

#[sqlx::test]
async fn test_daily_counts_newest_first(pool: PgPool) {
    seed(&pool).await;
    let repo = PgSubscriberRepository::new(Arc::new(pool));

    let counts = repo.daily_counts(SubscriberFilter::all()).await.unwrap();

    assert_eq!(
        counts,
        vec![
            DailyCount::new(day(2024, 1, 2), 1),
            DailyCount::new(day(2024, 1, 1), 2),
            DailyCount::new(day(2023, 12, 31), 1),
        ]
    );
}

#[sqlx::test]
async fn test_daily_counts_empty_table(pool: PgPool) {
    let repo = PgSubscriberRepository::new(Arc::new(pool));

    let counts = repo.daily_counts(SubscriberFilter::all()).await.unwrap();

    assert!(counts.is_empty());
}

#[sqlx::test]
async fn test_daily_counts_match_in_memory_aggregation(pool: PgPool) {
    for i in 0..60u32 {
        let created_at = common::at(2024, 1 + i % 3, 1 + (i * 11) % 28, (i * 5) % 24, i % 60);
        common::insert_subscriber(&pool, &format!("user{i}@example.com"), created_at).await;
    }
    let repo = PgSubscriberRepository::new(Arc::new(pool));

    let all = repo.list(SubscriberFilter::all(), 0, 1000).await.unwrap();
    let from_sql = repo.daily_counts(SubscriberFilter::all()).await.unwrap();

    assert_eq!(from_sql, aggregate_daily(&all));
}

#[sqlx::test]
async fn test_filter_uses_half_open_utc_range(pool: PgPool) {
    seed(&pool).await;
    let repo = PgSubscriberRepository::new(Arc::new(pool));
    let filter = SubscriberFilter::from_hierarchy(&DateHierarchy::Day(day(2024, 1, 1)));

    assert_eq!(repo.count(filter).await.unwrap(), 2);
    assert_eq!(
        repo.daily_counts(filter).await.unwrap(),
        vec![DailyCount::new(day(2024, 1, 1), 2)]
    );
}

#[sqlx::test]
async fn test_list_is_newest_first_and_paginated(pool: PgPool) {
    seed(&pool).await;
    let repo = PgSubscriberRepository::new(Arc::new(pool));

    let first = repo.list(SubscriberFilter::all(), 0, 2).await.unwrap();
    let second = repo.list(SubscriberFilter::all(), 2, 2).await.unwrap();
    let past_end = repo.list(SubscriberFilter::all(), 10, 2).await.unwrap();

    assert_eq!(
        first.iter().map(|s| s.email.as_str()).collect::<Vec<_>>(),
        vec!["d@example.com", "c@example.com"]
    );
    assert_eq!(
        second.iter().map(|s| s.email.as_str()).collect::<Vec<_>>(),
        vec!["b@example.com", "a@example.com"]
    );
    assert!(past_end.is_empty());
}

#[sqlx::test]
async fn test_periods_per_level(pool: PgPool) {
    seed(&pool).await;
    let repo = PgSubscriberRepository::new(Arc::new(pool));

    let years = repo
        .periods(SubscriberFilter::all(), HierarchyLevel::Year)
        .await
        .unwrap();
    assert_eq!(years, vec![day(2023, 1, 1), day(2024, 1, 1)]);

    let january = SubscriberFilter::from_hierarchy(&DateHierarchy::Month(2024, 1));
    let days = repo.periods(january, HierarchyLevel::Day).await.unwrap();
    assert_eq!(days, vec![day(2024, 1, 1), day(2024, 1, 2)]);
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgSubscriberRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}

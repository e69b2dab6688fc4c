//! Core domain entities.
//!
//! - [`Subscriber`] - A persisted email signup
//! - [`DailyCount`] - Derived number of signups on one calendar day
//!
//! [`aggregate_daily`] is the in-memory form of the daily signup aggregation;
//! the PostgreSQL repository computes the same result with a `GROUP BY`.

pub mod daily_count;
pub mod subscriber;

pub use daily_count::{DailyCount, aggregate_daily};
pub use subscriber::Subscriber;

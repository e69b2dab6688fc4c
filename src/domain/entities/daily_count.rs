//! Daily signup counts derived from subscriber records.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::collections::BTreeMap;

use super::Subscriber;

/// Number of subscribers who signed up on one calendar day (UTC).
///
/// Never persisted; recomputed from the records on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

impl DailyCount {
    pub fn new(date: NaiveDate, count: i64) -> Self {
        Self { date, count }
    }

    /// Midnight UTC of the counted day.
    pub fn day_start(&self) -> DateTime<Utc> {
        self.date.and_time(NaiveTime::MIN).and_utc()
    }
}

/// Groups records by the UTC calendar day of `created_at` and counts them.
///
/// The result holds one entry per distinct day, most recent day first.
/// Counts always sum to the number of input records.
pub fn aggregate_daily<'a, I>(records: I) -> Vec<DailyCount>
where
    I: IntoIterator<Item = &'a Subscriber>,
{
    let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for record in records {
        *per_day.entry(record.created_at.date_naive()).or_default() += 1;
    }

    per_day
        .into_iter()
        .rev()
        .map(|(date, count)| DailyCount::new(date, count))
        .collect()
}

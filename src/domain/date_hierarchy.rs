//! Year / month / day drill-down filter on a subscriber's signup time.
//!
//! The changelist narrows the listed subscribers one calendar level at a time:
//! all dates, then one year, one month, and finally a single day. Every level
//! maps to a half-open UTC range `[start, end)`.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

/// Errors produced while building a [`DateHierarchy`] from query parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateHierarchyError {
    #[error("month filter requires a year")]
    MonthWithoutYear,

    #[error("day filter requires a year and a month")]
    DayWithoutMonth,

    #[error("invalid calendar date: {0}")]
    InvalidDate(String),
}

/// Granularity of the periods offered for the next drill-down step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyLevel {
    Year,
    Month,
    Day,
}

impl HierarchyLevel {
    /// Unit name accepted by PostgreSQL `date_trunc`.
    pub fn as_trunc_unit(&self) -> &'static str {
        match self {
            HierarchyLevel::Year => "year",
            HierarchyLevel::Month => "month",
            HierarchyLevel::Day => "day",
        }
    }

    /// Truncates a date to the first day of its period at this level.
    pub fn truncate(&self, date: NaiveDate) -> NaiveDate {
        match self {
            HierarchyLevel::Year => date.with_ordinal(1).unwrap_or(date),
            HierarchyLevel::Month => date.with_day(1).unwrap_or(date),
            HierarchyLevel::Day => date,
        }
    }

    /// Link label for a period at this level, e.g. `2024`, `January`, `January 2`.
    pub fn label(&self, period: NaiveDate) -> String {
        match self {
            HierarchyLevel::Year => period.format("%Y").to_string(),
            HierarchyLevel::Month => period.format("%B").to_string(),
            HierarchyLevel::Day => period.format("%B %-d").to_string(),
        }
    }
}

/// Current position in the date drill-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateHierarchy {
    #[default]
    All,
    Year(i32),
    Month(i32, u32),
    Day(NaiveDate),
}

impl DateHierarchy {
    /// Builds a hierarchy position from the `year`, `month` and `day` parameters.
    ///
    /// # Errors
    ///
    /// - [`DateHierarchyError::MonthWithoutYear`] if `month` is given without `year`
    /// - [`DateHierarchyError::DayWithoutMonth`] if `day` is given without `year` and `month`
    /// - [`DateHierarchyError::InvalidDate`] if the parts do not form a calendar date
    pub fn from_parts(
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
    ) -> Result<Self, DateHierarchyError> {
        match (year, month, day) {
            (None, None, None) => Ok(DateHierarchy::All),
            (None, Some(_), _) => Err(DateHierarchyError::MonthWithoutYear),
            (_, None, Some(_)) => Err(DateHierarchyError::DayWithoutMonth),
            (Some(y), None, None) => NaiveDate::from_ymd_opt(y, 1, 1)
                .map(|_| DateHierarchy::Year(y))
                .ok_or_else(|| DateHierarchyError::InvalidDate(format!("{y}"))),
            (Some(y), Some(m), None) => NaiveDate::from_ymd_opt(y, m, 1)
                .map(|_| DateHierarchy::Month(y, m))
                .ok_or_else(|| DateHierarchyError::InvalidDate(format!("{y}-{m:02}"))),
            (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(y, m, d)
                .map(DateHierarchy::Day)
                .ok_or_else(|| DateHierarchyError::InvalidDate(format!("{y}-{m:02}-{d:02}"))),
        }
    }

    /// First and one-past-last day covered by this position.
    fn day_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let (start, end) = match *self {
            DateHierarchy::All => return None,
            DateHierarchy::Year(y) => {
                let start = NaiveDate::from_ymd_opt(y, 1, 1)?;
                (start, start.checked_add_months(Months::new(12))?)
            }
            DateHierarchy::Month(y, m) => {
                let start = NaiveDate::from_ymd_opt(y, m, 1)?;
                (start, start.checked_add_months(Months::new(1))?)
            }
            DateHierarchy::Day(date) => (date, date.succ_opt()?),
        };
        Some((start, end))
    }

    /// Half-open UTC range `[from, to)`; `(None, None)` for [`DateHierarchy::All`].
    pub fn range(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        match self.day_bounds() {
            Some((start, end)) => (
                Some(start.and_time(NaiveTime::MIN).and_utc()),
                Some(end.and_time(NaiveTime::MIN).and_utc()),
            ),
            None => (None, None),
        }
    }

    /// Level of the periods offered as the next drill-down step, if any.
    pub fn drill_down_level(&self) -> Option<HierarchyLevel> {
        match self {
            DateHierarchy::All => Some(HierarchyLevel::Year),
            DateHierarchy::Year(_) => Some(HierarchyLevel::Month),
            DateHierarchy::Month(_, _) => Some(HierarchyLevel::Day),
            DateHierarchy::Day(_) => None,
        }
    }

    /// Position one level up, `None` at [`DateHierarchy::All`].
    pub fn parent(&self) -> Option<DateHierarchy> {
        match *self {
            DateHierarchy::All => None,
            DateHierarchy::Year(_) => Some(DateHierarchy::All),
            DateHierarchy::Month(y, _) => Some(DateHierarchy::Year(y)),
            DateHierarchy::Day(date) => Some(DateHierarchy::Month(date.year(), date.month())),
        }
    }

    /// Position reached by selecting `period` at the current drill-down level.
    pub fn child(&self, period: NaiveDate) -> Option<DateHierarchy> {
        match self {
            DateHierarchy::All => Some(DateHierarchy::Year(period.year())),
            DateHierarchy::Year(_) => Some(DateHierarchy::Month(period.year(), period.month())),
            DateHierarchy::Month(_, _) => Some(DateHierarchy::Day(period)),
            DateHierarchy::Day(_) => None,
        }
    }

    /// Query string selecting this position, without the leading `?`.
    pub fn query_string(&self) -> String {
        match *self {
            DateHierarchy::All => String::new(),
            DateHierarchy::Year(y) => format!("year={y}"),
            DateHierarchy::Month(y, m) => format!("year={y}&month={m}"),
            DateHierarchy::Day(date) => format!(
                "year={}&month={}&day={}",
                date.year(),
                date.month(),
                date.day()
            ),
        }
    }

    /// Human readable title, e.g. `All dates`, `2024`, `January 2024`, `January 2, 2024`.
    pub fn title(&self) -> String {
        match self.day_bounds() {
            None => "All dates".to_string(),
            Some((start, _)) => match self {
                DateHierarchy::Year(_) => start.format("%Y").to_string(),
                DateHierarchy::Month(_, _) => start.format("%B %Y").to_string(),
                _ => start.format("%B %-d, %Y").to_string(),
            },
        }
    }
}

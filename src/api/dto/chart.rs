//! Wire format of the signup chart series.
//!
//! The browser chart consumes a bare JSON array:
//!
//! ```json
//! [{"date": "2024-01-02T00:00:00Z", "y": 1}, {"date": "2024-01-01T00:00:00Z", "y": 2}]
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::DailyCount;

/// One point of the signup chart: midnight UTC of the day and its signup count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub date: DateTime<Utc>,
    pub y: i64,
}

impl From<DailyCount> for ChartPoint {
    fn from(day: DailyCount) -> Self {
        Self {
            date: day.day_start(),
            y: day.count,
        }
    }
}

/// Converts daily counts to chart points, keeping their order.
pub fn chart_points(counts: Vec<DailyCount>) -> Vec<ChartPoint> {
    counts.into_iter().map(ChartPoint::from).collect()
}

/// Serializes daily counts as the JSON array embedded in the changelist page.
pub fn chart_json(counts: Vec<DailyCount>) -> Result<String, serde_json::Error> {
    serde_json::to_string(&chart_points(counts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32, count: i64) -> DailyCount {
        DailyCount::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), count)
    }

    #[test]
    fn test_chart_json_shape() {
        let json = chart_json(vec![day(2024, 1, 2, 1), day(2024, 1, 1, 2)]).unwrap();

        assert_eq!(
            json,
            r#"[{"date":"2024-01-02T00:00:00Z","y":1},{"date":"2024-01-01T00:00:00Z","y":2}]"#
        );
    }

    #[test]
    fn test_chart_json_empty_is_empty_array() {
        assert_eq!(chart_json(vec![]).unwrap(), "[]");
    }

    #[test]
    fn test_chart_points_keep_order() {
        let points = chart_points(vec![day(2024, 3, 1, 5), day(2024, 2, 1, 4)]);

        assert_eq!(points.len(), 2);
        assert!(points[0].date > points[1].date);
        assert_eq!(points[0].y, 5);
    }
}

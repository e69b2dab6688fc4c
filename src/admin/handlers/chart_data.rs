//! JSON endpoint feeding the signup chart.

use axum::{Json, extract::State};

use crate::api::dto::{ChartPoint, chart_points};
use crate::domain::repositories::SubscriberFilter;
use crate::error::AppError;
use crate::state::AppState;

/// Returns signups per day over every subscriber, newest day first.
///
/// # Endpoint
///
/// `GET {prefix}/subscribers/chart_data`
///
/// Query parameters are ignored; the changelist date filter never applies
/// here. The body is a bare JSON array:
///
/// ```json
/// [{"date": "2024-01-02T00:00:00Z", "y": 1}, {"date": "2024-01-01T00:00:00Z", "y": 2}]
/// ```
///
/// # Errors
///
/// Returns `500` if the subscriber store cannot be queried.
pub async fn chart_data_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChartPoint>>, AppError> {
    let counts = state
        .subscriber_service
        .daily_signups(SubscriberFilter::all())
        .await?;

    tracing::debug!(days = counts.len(), "Serving subscriber chart data");

    Ok(Json(chart_points(counts)))
}

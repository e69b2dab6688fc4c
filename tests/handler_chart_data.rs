mod common;

use chrono::NaiveDate;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use subscriber_admin::infrastructure::persistence::MemorySubscriberRepository;

#[tokio::test]
async fn test_chart_data_returns_bare_array_newest_first() {
    let state = common::memory_state(common::seeded_memory_repo());
    let server = common::test_server(state);

    let response = server
        .get("/admin/subscribers/chart_data")
        .add_header("Cookie", common::session_cookie())
        .await;

    response.assert_status_ok();
    response.assert_json(&json!([
        {"date": "2024-01-02T00:00:00Z", "y": 1},
        {"date": "2024-01-01T00:00:00Z", "y": 2},
        {"date": "2023-12-31T00:00:00Z", "y": 1},
    ]));
}

#[tokio::test]
async fn test_chart_data_length_is_number_of_distinct_days() {
    let repo = MemorySubscriberRepository::new();
    let mut days = HashSet::new();
    for i in 0..40u32 {
        let created_at = common::at(2024, 2, 1 + (i * 7) % 29, i % 24, (i * 13) % 60);
        days.insert(created_at.date_naive());
        repo.insert(format!("user{i}@example.com"), created_at).unwrap();
    }
    let server = common::test_server(common::memory_state(Arc::new(repo)));

    let response = server
        .get("/admin/subscribers/chart_data")
        .add_header("Cookie", common::session_cookie())
        .await;

    let body = response.json::<Value>();
    let points = body.as_array().expect("chart data is a JSON array");
    assert_eq!(points.len(), days.len());
    assert_eq!(
        points.iter().map(|p| p["y"].as_i64().unwrap()).sum::<i64>(),
        40
    );
}

#[tokio::test]
async fn test_chart_data_ignores_date_filter_parameters() {
    let state = common::memory_state(common::seeded_memory_repo());
    let server = common::test_server(state);

    let response = server
        .get("/admin/subscribers/chart_data?year=2024&month=1&day=2")
        .add_header("Cookie", common::session_cookie())
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>().as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_chart_data_empty_store() {
    let state = common::memory_state(Arc::new(MemorySubscriberRepository::new()));
    let server = common::test_server(state);

    let response = server
        .get("/admin/subscribers/chart_data")
        .add_header("Cookie", common::session_cookie())
        .await;

    response.assert_status_ok();
    response.assert_json(&json!([]));
}

#[tokio::test]
async fn test_chart_data_dates_are_utc_midnights() {
    let state = common::memory_state(common::seeded_memory_repo());
    let server = common::test_server(state);

    let body = server
        .get("/admin/subscribers/chart_data")
        .add_header("Cookie", common::session_cookie())
        .await
        .json::<Value>();

    for point in body.as_array().unwrap() {
        let date = point["date"].as_str().unwrap();
        assert!(date.ends_with("T00:00:00Z"), "{date} is not a day start");
        let day = &date[..10];
        assert!(NaiveDate::parse_from_str(day, "%Y-%m-%d").is_ok());
    }
}

#[tokio::test]
async fn test_chart_data_requires_session() {
    let state = common::memory_state(common::seeded_memory_repo());
    let server = common::test_server(state);

    let response = server.get("/admin/subscribers/chart_data").await;

    response.assert_status(axum::http::StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/admin/login");
}

#[tokio::test]
async fn test_chart_data_store_failure_is_server_error() {
    let server = common::test_server(common::subscriber_store_down_state());

    let response = server
        .get("/admin/subscribers/chart_data")
        .add_header("Cookie", common::session_cookie())
        .await;

    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"]["code"], "internal_error");
}

#[tokio::test]
async fn test_chart_data_token_store_failure_is_server_error_not_login() {
    let server = common::test_server(common::token_store_down_state());

    let response = server
        .get("/admin/subscribers/chart_data")
        .add_header("Cookie", common::session_cookie())
        .await;

    response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get("location").is_none());
}

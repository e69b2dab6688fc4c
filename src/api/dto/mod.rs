//! Data Transfer Objects for requests and responses.

pub mod chart;
pub mod health;
pub mod pagination;

pub use chart::{ChartPoint, chart_json, chart_points};

//! Admin site for browsing newsletter subscribers.
//!
//! Server-rendered pages (Askama templates) mounted under the configured
//! admin prefix.
//!
//! # Modules
//!
//! - [`dto`] - Query and form parameters
//! - [`handlers`] - Changelist, chart data and login handlers
//! - [`middleware`] - Cookie session check
//! - [`routes`] - Admin route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

//! JSON-facing pieces shared by the service: health endpoint, response DTOs
//! and HTTP middleware.
//!
//! - [`dto`] - Serializable request/response shapes
//! - [`handlers`] - Public JSON handlers
//! - [`middleware`] - Request tracing and rate limiting

pub mod dto;
pub mod handlers;
pub mod middleware;

//! HTTP middleware shared by every route group.
//!
//! Provides rate limiting and request tracing. Admin session checks live in
//! [`crate::admin::middleware`].

pub mod rate_limit;
pub mod tracing;

//! Admin-specific middleware.

pub mod admin_auth;

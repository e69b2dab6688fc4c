//! Application layer services.
//!
//! Services consume repository traits and give HTTP handlers and the CLI a
//! small, use-case shaped API.
//!
//! - [`services::subscriber_service::SubscriberService`] - Changelist and signup chart data
//! - [`services::auth_service::AuthService`] - Admin token hashing and validation

pub mod services;

//! Business logic services for the application layer.

pub mod auth_service;
pub mod subscriber_service;

pub use auth_service::AuthService;
pub use subscriber_service::{ChangeList, SubscriberService};

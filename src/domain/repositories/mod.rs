//! Repository trait definitions for the domain layer.
//!
//! Traits define the data access contract; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! with `mockall` for unit tests.
//!
//! - [`SubscriberRepository`] - Subscriber listing and signup aggregation
//! - [`TokenRepository`] - Admin token storage

pub mod subscriber_repository;
pub mod token_repository;

pub use subscriber_repository::{SubscriberFilter, SubscriberRepository};
pub use token_repository::{ApiToken, TokenLookup, TokenRepository};

#[cfg(test)]
pub use subscriber_repository::MockSubscriberRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;

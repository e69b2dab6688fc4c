//! Repository implementations.
//!
//! The PostgreSQL repositories use runtime-checked SQLx queries, so the crate
//! builds without a live database or offline query metadata.
//!
//! - [`PgSubscriberRepository`] - Subscriber listing and daily aggregation in SQL
//! - [`PgTokenRepository`] - Admin token storage
//! - [`MemorySubscriberRepository`] - In-process subscriber store for tests and demos

pub mod memory_subscriber_repository;
pub mod pg_subscriber_repository;
pub mod pg_token_repository;

pub use memory_subscriber_repository::MemorySubscriberRepository;
pub use pg_subscriber_repository::PgSubscriberRepository;
pub use pg_token_repository::PgTokenRepository;

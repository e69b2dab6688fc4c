//! Domain layer: entities, value objects and repository contracts.
//!
//! - [`entities`] - Subscriber records and derived daily counts
//! - [`date_hierarchy`] - Year / month / day drill-down filter
//! - [`repositories`] - Data access trait definitions
//!
//! Nothing here depends on HTTP or on a concrete database.

pub mod date_hierarchy;
pub mod entities;
pub mod repositories;

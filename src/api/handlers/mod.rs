//! Public JSON handlers.

pub mod health;

pub use health::health_handler;

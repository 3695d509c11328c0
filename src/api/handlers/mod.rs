//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod equipment;
pub mod health;
pub mod members;
pub mod rentals;
pub mod reservations;

pub use health::health_handler;

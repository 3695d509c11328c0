//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Amounts are integer cents; enum values are their
//! upper-case names (`GOOD`, `SILVER`, `ACTIVE`).

pub mod equipment;
pub mod health;
pub mod members;
pub mod pagination;
pub mod rentals;
pub mod reservations;

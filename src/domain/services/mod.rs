//! Pure domain services: no I/O, no clock.
//!
//! - [`fee_calculator`] - rental cost, late and damage fees
//! - [`availability`] - overlap check against blocking rentals and reservations

pub mod availability;
pub mod fee_calculator;

pub use availability::{Conflict, Exclusions};

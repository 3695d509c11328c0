//! Core domain entities.
//!
//! Entities are constructed through factory functions (`register`, `create`,
//! `assess`) that validate their invariants, and they own their lifecycle
//! transitions. Each has a companion `New*` struct carrying creation input.
//!
//! - [`Equipment`] - inventory item with condition and possession state
//! - [`Member`] - customer with a membership tier
//! - [`Rental`] - loan of equipment, see the state machine in [`rental`]
//! - [`Reservation`] - future hold on equipment
//! - [`DamageAssessment`] - fee record for degraded returns

pub mod damage_assessment;
pub mod equipment;
pub mod member;
pub mod rental;
pub mod reservation;

pub use damage_assessment::DamageAssessment;
pub use equipment::{Equipment, EquipmentPatch, NewEquipment};
pub use member::{Member, NewMember};
pub use rental::{NewRental, Rental, RentalStatus};
pub use reservation::{NewReservation, Reservation, ReservationStatus};

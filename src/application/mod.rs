//! Application layer: use cases orchestrating the domain.
//!
//! Services load entities through repository traits, call entity methods,
//! persist the result and publish domain events. They return [`crate::error::AppError`]
//! so handlers can pass failures straight to the HTTP layer.
//!
//! # Available Services
//!
//! - [`services::EquipmentService`] - intake, updates, maintenance, availability
//! - [`services::MemberService`] - registration, tiers, deactivation
//! - [`services::RentalService`] - checkout, lifecycle, returns, overdue sweep
//! - [`services::ReservationService`] - booking and fulfilment
//! - [`event_handlers::NotificationEventHandler`] - member notifications

pub mod event_handlers;
pub mod services;

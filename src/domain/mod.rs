//! Domain layer: business entities, rules and ports.
//!
//! Nothing here touches HTTP or a database. Entities own their lifecycle
//! transitions and return [`errors::DomainError`] on rule violations; the
//! application services in [`crate::application`] coordinate them through
//! the repository and port traits.
//!
//! - [`value_objects`] - money, date ranges, identifiers, conditions, tiers
//! - [`entities`] - equipment, members, rentals, reservations, assessments
//! - [`services`] - pure fee and availability rules
//! - [`events`] - facts published after persistence
//! - [`ports`] - clock, payment, notification and event publication
//! - [`repositories`] - data access traits

pub mod entities;
pub mod errors;
pub mod events;
pub mod ports;
pub mod repositories;
pub mod services;
pub mod value_objects;

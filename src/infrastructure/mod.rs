//! Infrastructure layer for external integrations.
//!
//! This layer implements the ports defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`memory`] - in-process repositories
//! - [`events`] - event bus and recording publisher
//! - [`payment`] - simulated payment gateway
//! - [`notification`] - logging notification adapter

pub mod events;
pub mod memory;
pub mod notification;
pub mod payment;
pub mod persistence;

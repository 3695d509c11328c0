//! Immutable value types enforcing primitive invariants.
//!
//! - [`Money`] - non-negative amount in cents
//! - [`DateRange`] - closed date interval with `start <= end`
//! - [`EquipmentCondition`] - ordered condition scale
//! - [`MembershipTier`] - tier limits and discounts
//! - identifiers ([`EquipmentId`], [`MemberId`], [`RentalId`], [`ReservationId`], [`AssessmentId`])

pub mod condition;
pub mod date_range;
pub mod ids;
pub mod membership_tier;
pub mod money;

pub use condition::EquipmentCondition;
pub use date_range::DateRange;
pub use ids::{AssessmentId, EquipmentId, MemberId, RentalId, ReservationId};
pub use membership_tier::MembershipTier;
pub use money::Money;

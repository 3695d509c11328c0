//! Strongly typed entity identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainError;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|_| DomainError::validation($label, format!("'{s}' is not a valid UUID")))
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identifier of an [`crate::domain::entities::Equipment`].
    EquipmentId,
    "equipment_id"
);
entity_id!(
    /// Identifier of a [`crate::domain::entities::Member`].
    MemberId,
    "member_id"
);
entity_id!(
    /// Identifier of a [`crate::domain::entities::Rental`].
    RentalId,
    "rental_id"
);
entity_id!(
    /// Identifier of a [`crate::domain::entities::Reservation`].
    ReservationId,
    "reservation_id"
);
entity_id!(
    /// Identifier of a [`crate::domain::entities::DamageAssessment`].
    AssessmentId,
    "assessment_id"
);

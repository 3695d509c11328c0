//! Physical condition of a piece of equipment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Condition on a fixed scale, best first.
///
/// The declaration order is the degradation order, so the derived `Ord`
/// gives `Excellent < Good < Fair < Poor < Damaged < UnderRepair`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentCondition {
    Excellent,
    Good,
    Fair,
    Poor,
    Damaged,
    UnderRepair,
}

impl EquipmentCondition {
    pub const ALL: [EquipmentCondition; 6] = [
        Self::Excellent,
        Self::Good,
        Self::Fair,
        Self::Poor,
        Self::Damaged,
        Self::UnderRepair,
    ];

    /// Position on the scale, 0 for `Excellent`.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Number of levels this condition is worse than `before`.
    ///
    /// Zero when unchanged or improved.
    pub fn degradation_from(self, before: EquipmentCondition) -> u8 {
        self.ordinal().saturating_sub(before.ordinal())
    }

    /// Only equipment in fair or better condition may go out on rental.
    pub const fn is_rentable(self) -> bool {
        matches!(self, Self::Excellent | Self::Good | Self::Fair)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Fair => "FAIR",
            Self::Poor => "POOR",
            Self::Damaged => "DAMAGED",
            Self::UnderRepair => "UNDER_REPAIR",
        }
    }
}

impl fmt::Display for EquipmentCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentCondition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| {
                DomainError::validation("condition", format!("unknown condition '{s}'"))
            })
    }
}

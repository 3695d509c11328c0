//! Membership tiers and the limits attached to them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Membership level bounding concurrent rentals, discount and rental length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipTier {
    Basic,
    Silver,
    Gold,
    Platinum,
}

impl MembershipTier {
    pub const ALL: [MembershipTier; 4] = [Self::Basic, Self::Silver, Self::Gold, Self::Platinum];

    /// Rentals a member may hold at once (pending, active or overdue).
    pub const fn max_concurrent_rentals(self) -> u32 {
        match self {
            Self::Basic => 2,
            Self::Silver => 3,
            Self::Gold => 5,
            Self::Platinum => 10,
        }
    }

    /// Percentage taken off rental cost and late fees.
    pub const fn discount_percent(self) -> u8 {
        match self {
            Self::Basic => 0,
            Self::Silver => 5,
            Self::Gold => 10,
            Self::Platinum => 15,
        }
    }

    /// Longest single rental period in days.
    pub const fn max_rental_days(self) -> u32 {
        match self {
            Self::Basic => 7,
            Self::Silver => 14,
            Self::Gold => 30,
            Self::Platinum => 60,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::Silver => "SILVER",
            Self::Gold => "GOLD",
            Self::Platinum => "PLATINUM",
        }
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                DomainError::validation("membership_tier", format!("unknown tier '{s}'"))
            })
    }
}

//! Non-negative monetary amount.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// An amount of money in US cents.
///
/// The inner value is never negative; every constructor and operation that
/// could produce a negative amount returns an error instead.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates an amount from cents.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] for negative amounts.
    pub fn from_cents(cents: i64) -> DomainResult<Self> {
        if cents < 0 {
            return Err(DomainError::validation(
                "amount",
                format!("money cannot be negative, got {cents} cents"),
            ));
        }
        Ok(Self(cents))
    }

    pub const fn from_dollars(dollars: u32) -> Self {
        Self(dollars as i64 * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Subtracts `other`, failing if the result would be negative.
    pub fn checked_sub(self, other: Money) -> DomainResult<Self> {
        Self::from_cents(self.0 - other.0)
    }

    pub fn multiply(self, factor: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(factor)))
    }

    /// Returns `pct` percent of this amount, rounded half-up to the cent.
    pub fn percentage(self, pct: u32) -> Self {
        Self((self.0.saturating_mul(i64::from(pct)) + 50) / 100)
    }

    /// Reduces the amount by `discount_pct` percent (capped at 100).
    pub fn apply_discount(self, discount_pct: u8) -> Self {
        let pct = u32::from(discount_pct.min(100));
        self.percentage(100 - pct)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl TryFrom<i64> for Money {
    type Error = DomainError;

    fn try_from(cents: i64) -> Result<Self, Self::Error> {
        Self::from_cents(cents)
    }
}

impl From<Money> for i64 {
    fn from(money: Money) -> i64 {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

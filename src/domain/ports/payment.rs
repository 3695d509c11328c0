//! Payment gateway port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::value_objects::{MemberId, Money, RentalId};
use crate::error::AppError;

/// What a charge is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargeKind {
    RentalFee,
    LateFee,
    DamageFee,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub member_id: MemberId,
    pub rental_id: RentalId,
    pub amount: Money,
    pub kind: ChargeKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub transaction_id: Uuid,
    pub amount: Money,
    pub charged_at: DateTime<Utc>,
}

/// Charges members for rentals and fees.
///
/// # Implementations
///
/// - [`crate::infrastructure::payment::SimulatedPaymentService`] - always succeeds, logs the charge
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Charges `request.amount`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the gateway rejects the charge.
    async fn charge(&self, request: PaymentRequest) -> Result<PaymentReceipt, AppError>;
}

//! Payment gateway adapters.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{PaymentReceipt, PaymentRequest, PaymentService};
use crate::error::AppError;

/// Accepts every charge and logs it.
///
/// Stands in for a real gateway; no money moves.
#[derive(Debug, Default)]
pub struct SimulatedPaymentService;

#[async_trait]
impl PaymentService for SimulatedPaymentService {
    async fn charge(&self, request: PaymentRequest) -> Result<PaymentReceipt, AppError> {
        let receipt = PaymentReceipt {
            transaction_id: Uuid::new_v4(),
            amount: request.amount,
            charged_at: Utc::now(),
        };

        metrics::counter!("payments_charged_cents_total").increment(request.amount.cents().unsigned_abs());
        tracing::info!(
            member_id = %request.member_id,
            rental_id = %request.rental_id,
            amount = %request.amount,
            kind = ?request.kind,
            transaction_id = %receipt.transaction_id,
            "Payment charged"
        );

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ChargeKind;
    use crate::domain::value_objects::{MemberId, Money, RentalId};

    #[tokio::test]
    async fn test_receipt_echoes_amount() {
        let receipt = SimulatedPaymentService
            .charge(PaymentRequest {
                member_id: MemberId::new(),
                rental_id: RentalId::new(),
                amount: Money::from_dollars(42),
                kind: ChargeKind::LateFee,
            })
            .await
            .unwrap();

        assert_eq!(receipt.amount, Money::from_dollars(42));
    }
}

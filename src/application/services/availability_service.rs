//! Loads blocking records and runs the availability rule against them.

use std::sync::Arc;

use crate::domain::repositories::{RentalRepository, ReservationRepository};
use crate::domain::services::{Exclusions, availability};
use crate::domain::value_objects::{DateRange, EquipmentId};
use crate::error::AppError;

/// Date-based availability for a single piece of equipment.
pub struct AvailabilityService {
    rentals: Arc<dyn RentalRepository>,
    reservations: Arc<dyn ReservationRepository>,
}

impl AvailabilityService {
    pub fn new(
        rentals: Arc<dyn RentalRepository>,
        reservations: Arc<dyn ReservationRepository>,
    ) -> Self {
        Self {
            rentals,
            reservations,
        }
    }

    /// Whether no blocking rental or reservation overlaps `period`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn is_available(
        &self,
        equipment_id: EquipmentId,
        period: &DateRange,
        exclusions: Exclusions,
    ) -> Result<bool, AppError> {
        let rentals = self.rentals.find_blocking(equipment_id).await?;
        let reservations = self.reservations.find_blocking(equipment_id).await?;

        Ok(availability::is_available(
            equipment_id,
            period,
            &rentals,
            &reservations,
            exclusions,
        ))
    }

    /// Fails with `EQUIPMENT_UNAVAILABLE` when a blocking record overlaps `period`.
    pub async fn ensure_available(
        &self,
        equipment_id: EquipmentId,
        period: &DateRange,
        exclusions: Exclusions,
    ) -> Result<(), AppError> {
        let rentals = self.rentals.find_blocking(equipment_id).await?;
        let reservations = self.reservations.find_blocking(equipment_id).await?;

        availability::ensure_available(equipment_id, period, &rentals, &reservations, exclusions)
            .map_err(|e| {
                tracing::debug!(%equipment_id, start = %period.start(), end = %period.end(), "Availability conflict");
                AppError::from(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{NewRental, Rental};
    use crate::domain::repositories::{MockRentalRepository, MockReservationRepository};
    use crate::domain::value_objects::{MemberId, MembershipTier, Money};
    use chrono::{NaiveDate, Utc};

    fn range(start: u32, end: u32) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2026, 9, start).unwrap(),
            NaiveDate::from_ymd_opt(2026, 9, end).unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_conflicting_rental_is_unavailable() {
        let equipment_id = EquipmentId::new();
        let existing = Rental::create(
            NewRental {
                equipment_id,
                member_id: MemberId::new(),
                reservation_id: None,
                period: range(10, 15),
                daily_rate: Money::from_dollars(10),
                tier: MembershipTier::Basic,
            },
            Utc::now(),
        );

        let mut rentals = MockRentalRepository::new();
        rentals
            .expect_find_blocking()
            .times(2)
            .returning(move |_| Ok(vec![existing.clone()]));
        let mut reservations = MockReservationRepository::new();
        reservations
            .expect_find_blocking()
            .times(2)
            .returning(|_| Ok(vec![]));

        let service = AvailabilityService::new(Arc::new(rentals), Arc::new(reservations));

        let free = service
            .is_available(equipment_id, &range(15, 16), Exclusions::none())
            .await
            .unwrap();
        assert!(!free);

        let err = service
            .ensure_available(equipment_id, &range(1, 10), Exclusions::none())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "EQUIPMENT_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_storage_error_propagates() {
        let mut rentals = MockRentalRepository::new();
        rentals
            .expect_find_blocking()
            .returning(|_| Err(AppError::internal("Database error", serde_json::json!({}))));
        let reservations = MockReservationRepository::new();

        let service = AvailabilityService::new(Arc::new(rentals), Arc::new(reservations));
        let result = service
            .is_available(EquipmentId::new(), &range(1, 2), Exclusions::none())
            .await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}

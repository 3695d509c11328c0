use std::sync::Arc;

use crate::application::services::{
    EquipmentService, MemberService, RentalService, ReservationService,
};
use crate::domain::ports::Clock;
use crate::domain::repositories::StorageHealth;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub equipment_service: Arc<EquipmentService>,
    pub member_service: Arc<MemberService>,
    pub rental_service: Arc<RentalService>,
    pub reservation_service: Arc<ReservationService>,
    pub storage: Arc<dyn StorageHealth>,
    pub clock: Arc<dyn Clock>,
}

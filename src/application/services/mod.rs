//! Business logic services for the application layer.

pub mod availability_service;
pub mod equipment_service;
pub mod member_service;
pub mod rental_service;
pub mod reservation_service;

pub use availability_service::AvailabilityService;
pub use equipment_service::EquipmentService;
pub use member_service::MemberService;
pub use rental_service::{Checkout, RentalService, ReturnOutcome};
pub use reservation_service::ReservationService;

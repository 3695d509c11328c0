//! OpenAPI document served at `/api-docs`.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto;
use crate::api::handlers::{equipment, health, members, rentals, reservations};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_handler,
        equipment::register_equipment_handler,
        equipment::list_equipment_handler,
        equipment::available_equipment_handler,
        equipment::get_equipment_handler,
        equipment::update_equipment_handler,
        equipment::equipment_availability_handler,
        equipment::send_to_maintenance_handler,
        equipment::complete_maintenance_handler,
        members::register_member_handler,
        members::list_members_handler,
        members::get_member_handler,
        members::change_tier_handler,
        members::deactivate_member_handler,
        members::member_rentals_handler,
        rentals::checkout_handler,
        rentals::list_rentals_handler,
        rentals::overdue_rentals_handler,
        rentals::sweep_overdue_handler,
        rentals::get_rental_handler,
        rentals::activate_rental_handler,
        rentals::extend_rental_handler,
        rentals::return_rental_handler,
        rentals::cancel_rental_handler,
        rentals::damage_assessment_handler,
        reservations::create_reservation_handler,
        reservations::list_reservations_handler,
        reservations::get_reservation_handler,
        reservations::confirm_reservation_handler,
        reservations::cancel_reservation_handler,
        reservations::fulfill_reservation_handler,
    ),
    components(schemas(
        dto::health::HealthResponse,
        dto::equipment::EquipmentResponse,
        dto::equipment::AvailabilityResponse,
        dto::members::MemberResponse,
        dto::rentals::RentalResponse,
        dto::rentals::ReturnResponse,
        dto::rentals::DamageAssessmentResponse,
        dto::rentals::OverdueResponse,
        dto::reservations::ReservationResponse,
        dto::reservations::FulfillResponse,
        dto::pagination::PageInfo,
    )),
    tags(
        (name = "equipment", description = "Inventory and maintenance"),
        (name = "members", description = "Memberships and tiers"),
        (name = "rentals", description = "Checkout, returns and fees"),
        (name = "reservations", description = "Future holds on equipment"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "Equipment Rental API",
        description = "Equipment inventory, memberships, rentals and reservations. Amounts are in cents."
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/api-docs` with the document at `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/equipment",
            "/api/equipment/available",
            "/api/equipment/{id}/maintenance/complete",
            "/api/members/{id}/tier",
            "/api/rentals/overdue/sweep",
            "/api/rentals/{id}/damage-assessment",
            "/api/reservations/{id}/fulfill",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path}");
        }
    }
}

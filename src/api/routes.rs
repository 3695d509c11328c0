//! API route configuration.

use crate::api::handlers::{equipment, members, rentals, reservations};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch, post},
};

/// All `/api` routes, relative to the `/api` prefix.
///
/// # Endpoints
///
/// - `GET|POST  /equipment`                          - List / register equipment
/// - `GET       /equipment/available`                - Equipment free for a period
/// - `GET|PATCH /equipment/{id}`                     - Fetch / update an item
/// - `GET       /equipment/{id}/availability`        - Is one item free for a period
/// - `POST      /equipment/{id}/maintenance`         - Send to maintenance
/// - `POST      /equipment/{id}/maintenance/complete`- Back in service
/// - `GET|POST  /members`                            - List / register members
/// - `GET       /members/{id}`                       - Fetch a member
/// - `PATCH     /members/{id}/tier`                  - Change tier
/// - `POST      /members/{id}/deactivate`            - Deactivate
/// - `GET       /members/{id}/rentals`               - A member's rentals
/// - `GET|POST  /rentals`                            - List / check out
/// - `GET       /rentals/overdue`                    - Overdue as of today
/// - `POST      /rentals/overdue/sweep`              - Persist overdue status
/// - `GET       /rentals/{id}`                       - Fetch a rental
/// - `POST      /rentals/{id}/{activate,extend,return,cancel}`
/// - `GET       /rentals/{id}/damage-assessment`     - Assessment for a return
/// - `GET|POST  /reservations`                       - List / book
/// - `GET       /reservations/{id}`                  - Fetch a reservation
/// - `POST      /reservations/{id}/{confirm,cancel,fulfill}`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(equipment_routes())
        .merge(member_routes())
        .merge(rental_routes())
        .merge(reservation_routes())
}

fn equipment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/equipment",
            get(equipment::list_equipment_handler).post(equipment::register_equipment_handler),
        )
        .route(
            "/equipment/available",
            get(equipment::available_equipment_handler),
        )
        .route(
            "/equipment/{id}",
            get(equipment::get_equipment_handler).patch(equipment::update_equipment_handler),
        )
        .route(
            "/equipment/{id}/availability",
            get(equipment::equipment_availability_handler),
        )
        .route(
            "/equipment/{id}/maintenance",
            post(equipment::send_to_maintenance_handler),
        )
        .route(
            "/equipment/{id}/maintenance/complete",
            post(equipment::complete_maintenance_handler),
        )
}

fn member_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/members",
            get(members::list_members_handler).post(members::register_member_handler),
        )
        .route("/members/{id}", get(members::get_member_handler))
        .route("/members/{id}/tier", patch(members::change_tier_handler))
        .route(
            "/members/{id}/deactivate",
            post(members::deactivate_member_handler),
        )
        .route("/members/{id}/rentals", get(members::member_rentals_handler))
}

fn rental_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/rentals",
            get(rentals::list_rentals_handler).post(rentals::checkout_handler),
        )
        .route("/rentals/overdue", get(rentals::overdue_rentals_handler))
        .route("/rentals/overdue/sweep", post(rentals::sweep_overdue_handler))
        .route("/rentals/{id}", get(rentals::get_rental_handler))
        .route("/rentals/{id}/activate", post(rentals::activate_rental_handler))
        .route("/rentals/{id}/extend", post(rentals::extend_rental_handler))
        .route("/rentals/{id}/return", post(rentals::return_rental_handler))
        .route("/rentals/{id}/cancel", post(rentals::cancel_rental_handler))
        .route(
            "/rentals/{id}/damage-assessment",
            get(rentals::damage_assessment_handler),
        )
}

fn reservation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reservations",
            get(reservations::list_reservations_handler)
                .post(reservations::create_reservation_handler),
        )
        .route(
            "/reservations/{id}",
            get(reservations::get_reservation_handler),
        )
        .route(
            "/reservations/{id}/confirm",
            post(reservations::confirm_reservation_handler),
        )
        .route(
            "/reservations/{id}/cancel",
            post(reservations::cancel_reservation_handler),
        )
        .route(
            "/reservations/{id}/fulfill",
            post(reservations::fulfill_reservation_handler),
        )
}

mod common;

use axum::http::StatusCode;
use equipment_rental::domain::events::EventKind;
use serde_json::{Value, json};

async fn reserve(
    server: &axum_test::TestServer,
    equipment: &Value,
    member: &Value,
    start: u64,
    end: u64,
) -> axum_test::TestResponse {
    server
        .post("/api/reservations")
        .json(&json!({
            "equipment_id": equipment["id"],
            "member_id": member["id"],
            "start_date": common::day(start),
            "end_date": common::day(end),
        }))
        .await
}

#[tokio::test]
async fn test_create_reservation() {
    let app = common::test_app();
    let equipment = common::create_equipment(&app.server, "Paddleboard", 2500).await;
    let member = common::create_member(&app.server, "paddle@example.com", "SILVER").await;

    let response = reserve(&app.server, &equipment, &member, 5, 7).await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["status"], "PENDING");
    assert!(body["rental_id"].is_null());
    assert!(app.events.kinds().contains(&EventKind::ReservationCreated));
}

#[tokio::test]
async fn test_reservation_in_the_past_rejected() {
    let app = common::test_app();
    let equipment = common::create_equipment(&app.server, "Paddleboard", 2500).await;
    let member = common::create_member(&app.server, "early@example.com", "SILVER").await;
    app.clock.advance_days(2);

    let response = reserve(&app.server, &equipment, &member, 1, 3).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_reservation_blocks_checkout() {
    let app = common::test_app();
    let equipment = common::create_equipment(&app.server, "Van", 9000).await;
    let holder = common::create_member(&app.server, "holder@example.com", "GOLD").await;
    let other = common::create_member(&app.server, "other@example.com", "GOLD").await;

    reserve(&app.server, &equipment, &holder, 3, 5)
        .await
        .assert_status(StatusCode::CREATED);

    let response = common::checkout(&app.server, &equipment, &other, 5, 6).await;
    response.assert_status(StatusCode::CONFLICT);

    let response = reserve(&app.server, &equipment, &other, 1, 3).await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_reservation_for_inactive_member_rejected() {
    let app = common::test_app();
    let equipment = common::create_equipment(&app.server, "Van", 9000).await;
    let member = common::create_member(&app.server, "gone@example.com", "BASIC").await;
    app.server
        .post(&format!("/api/members/{}/deactivate", common::id(&member)))
        .await
        .assert_status_ok();

    let response = reserve(&app.server, &equipment, &member, 1, 2).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_confirm_and_fulfill() {
    let app = common::test_app();
    let equipment = common::create_equipment(&app.server, "Snowblower", 3000).await;
    let member = common::create_member(&app.server, "snow@example.com", "BASIC").await;
    let reservation: Value = reserve(&app.server, &equipment, &member, 2, 3).await.json();
    let id = common::id(&reservation);

    app.server
        .post(&format!("/api/reservations/{id}/fulfill"))
        .await
        .assert_status(StatusCode::CONFLICT);

    let response = app
        .server
        .post(&format!("/api/reservations/{id}/confirm"))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "CONFIRMED");

    app.clock.advance_days(2);
    let response = app
        .server
        .post(&format!("/api/reservations/{id}/fulfill"))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["reservation"]["status"], "FULFILLED");
    assert_eq!(body["reservation"]["rental_id"], body["rental"]["id"]);
    assert_eq!(body["rental"]["reservation_id"], reservation["id"]);
    assert_eq!(body["rental"]["status"], "ACTIVE");
    assert_eq!(body["rental"]["total_cost_cents"], 6000);
    assert!(app.events.kinds().contains(&EventKind::ReservationFulfilled));

    let stored: Value = app
        .server
        .get(&format!("/api/reservations/{id}"))
        .await
        .json();
    assert_eq!(stored["status"], "FULFILLED");
}

#[tokio::test]
async fn test_cancel_reservation_releases_period() {
    let app = common::test_app();
    let equipment = common::create_equipment(&app.server, "Telescope", 2200).await;
    let member = common::create_member(&app.server, "stars@example.com", "BASIC").await;
    let other = common::create_member(&app.server, "moon@example.com", "BASIC").await;
    let reservation: Value = reserve(&app.server, &equipment, &member, 1, 2).await.json();
    let id = common::id(&reservation);

    let response = app
        .server
        .post(&format!("/api/reservations/{id}/cancel"))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "CANCELLED");

    let response = app
        .server
        .post(&format!("/api/reservations/{id}/cancel"))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"]["code"], "ALREADY_CANCELLED");

    common::checkout(&app.server, &equipment, &other, 1, 2)
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_reservations_by_member() {
    let app = common::test_app();
    let equipment = common::create_equipment(&app.server, "Grill", 1800).await;
    let member = common::create_member(&app.server, "grill@example.com", "BASIC").await;
    let other = common::create_member(&app.server, "smoker@example.com", "BASIC").await;
    reserve(&app.server, &equipment, &member, 1, 1)
        .await
        .assert_status(StatusCode::CREATED);
    reserve(&app.server, &equipment, &other, 3, 3)
        .await
        .assert_status(StatusCode::CREATED);

    let response = app
        .server
        .get("/api/reservations")
        .add_query_param("member_id", common::id(&member))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["items"][0]["member_id"], member["id"]);
}

#[tokio::test]
async fn test_get_reservation_not_found() {
    let app = common::test_app();

    app.server
        .get("/api/reservations/00000000-0000-0000-0000-000000000000")
        .await
        .assert_status_not_found();
}

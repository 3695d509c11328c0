#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, Days, NaiveDate, Utc};
use equipment_rental::domain::ports::Clock;
use equipment_rental::infrastructure::events::RecordingEventPublisher;
use equipment_rental::infrastructure::memory::memory_repositories;
use equipment_rental::infrastructure::payment::SimulatedPaymentService;
use equipment_rental::routes::router;
use equipment_rental::server::build_state;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

/// First day the test clock shows.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

/// `today()` plus `n` days, formatted for request bodies.
pub fn day(n: u64) -> String {
    (today() + Days::new(n)).to_string()
}

/// Clock that tests can move forward.
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(today().and_hms_opt(12, 0, 0).unwrap().and_utc()),
        }
    }

    pub fn advance_days(&self, days: u64) {
        let mut now = self.now.lock().unwrap();
        *now = *now + Days::new(days);
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub clock: Arc<TestClock>,
    pub events: Arc<RecordingEventPublisher>,
}

/// Full router over in-memory storage, without the rate limiter.
pub fn test_app() -> TestApp {
    let clock = Arc::new(TestClock::new());
    let events = Arc::new(RecordingEventPublisher::new());
    let state = build_state(
        memory_repositories(),
        events.clone(),
        Arc::new(SimulatedPaymentService),
        clock.clone(),
    );
    let server = TestServer::new(router(state)).unwrap();

    TestApp {
        server,
        clock,
        events,
    }
}

pub async fn create_equipment(server: &TestServer, name: &str, daily_rate_cents: i64) -> Value {
    let response = server
        .post("/api/equipment")
        .json(&json!({
            "name": name,
            "category": "Tools",
            "daily_rate_cents": daily_rate_cents,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

pub async fn create_member(server: &TestServer, email: &str, tier: &str) -> Value {
    let response = server
        .post("/api/members")
        .json(&json!({
            "name": "Test Member",
            "email": email,
            "tier": tier,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Checks out `equipment` for `member` from `start` to `end` days after today.
pub async fn checkout(
    server: &TestServer,
    equipment: &Value,
    member: &Value,
    start: u64,
    end: u64,
) -> axum_test::TestResponse {
    server
        .post("/api/rentals")
        .json(&json!({
            "equipment_id": equipment["id"],
            "member_id": member["id"],
            "start_date": day(start),
            "end_date": day(end),
        }))
        .await
}

pub fn id(value: &Value) -> &str {
    value["id"].as_str().unwrap()
}

pub mod fixtures {
    use chrono::{DateTime, NaiveDate, Utc};
    use equipment_rental::domain::entities::{Equipment, Member, NewEquipment, NewMember};
    use equipment_rental::domain::ports::{Clock, SystemClock};
    use equipment_rental::domain::repositories::Repositories;
    use equipment_rental::domain::value_objects::{EquipmentCondition, MembershipTier, Money};

    pub fn now() -> DateTime<Utc> {
        SystemClock.now()
    }

    pub fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, day).unwrap()
    }

    pub fn equipment(name: &str, serial: Option<&str>) -> Equipment {
        Equipment::register(
            NewEquipment {
                name: name.to_string(),
                description: Some("test item".to_string()),
                category: "Tools".to_string(),
                serial_number: serial.map(str::to_string),
                daily_rate: Money::from_dollars(20),
                condition: EquipmentCondition::Good,
            },
            now(),
        )
        .unwrap()
    }

    pub fn member(email: &str) -> Member {
        Member::register(
            NewMember {
                name: "Repo Member".to_string(),
                email: email.to_string(),
                tier: MembershipTier::Silver,
            },
            now(),
        )
        .unwrap()
    }

    /// Saves one item and one member and returns them.
    pub async fn seed(repos: &Repositories, email: &str) -> (Equipment, Member) {
        let equipment = equipment("Seeded", None);
        let member = member(email);
        repos.equipment.save(&equipment).await.unwrap();
        repos.members.save(&member).await.unwrap();
        (equipment, member)
    }
}

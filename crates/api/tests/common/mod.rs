//! Common test utilities for integration tests.
//!
//! The app runs on the in-memory planner store, seeded per test.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request},
    Router,
};
use chrono::NaiveDate;
use domain::models::reservation::{Reservation, ReservationStatus};
use domain::models::suite::Suite;
use domain::services::store::InMemoryPlannerStore;
use fake::faker::name::en::Name;
use fake::Fake;
use villa_araca_api::{app::create_app, config::Config};

/// Test configuration on the in-memory backend.
pub fn test_config() -> Config {
    Config::load_for_test(&[]).expect("Failed to load test config")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Reservation fixture with a random guest name.
pub fn test_reservation(
    id: &str,
    suite_id: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    status: ReservationStatus,
) -> Reservation {
    Reservation {
        id: id.to_string(),
        guest_id: format!("g-{id}"),
        suite_id: suite_id.to_string(),
        check_in,
        check_out,
        guest_count: Some(2),
        total_value: Some(850.0),
        status,
        external_code: None,
        guest_name: Some(Name().fake()),
        suite: None,
    }
}

/// Two suites (Verde = s1, Azul = s2), r1 in s1 from March 10 to 12,
/// a day-use r2 on March 15 and a canceled r3 in s2.
pub fn seeded_store() -> Arc<InMemoryPlannerStore> {
    Arc::new(InMemoryPlannerStore::with_data(
        vec![Suite::new("s1", "Verde"), Suite::new("s2", "Azul")],
        vec![
            test_reservation(
                "r1",
                "s1",
                date(2024, 3, 10),
                date(2024, 3, 12),
                ReservationStatus::Confirmed,
            ),
            test_reservation(
                "r2",
                "s1",
                date(2024, 3, 15),
                date(2024, 3, 15),
                ReservationStatus::Confirmed,
            ),
            test_reservation(
                "r3",
                "s2",
                date(2024, 3, 1),
                date(2024, 3, 31),
                ReservationStatus::Canceled,
            ),
        ],
    ))
}

pub fn create_test_app(config: Config, store: Arc<InMemoryPlannerStore>) -> Router {
    create_app(config, store)
}

/// Build a JSON request.
pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Build a body-less request.
pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Helper to parse JSON response body.
pub async fn parse_response_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
}

/// Reservation id shown in a grid cell, if any.
pub fn reservation_at(grid: &serde_json::Value, day: u32, column: &str) -> Option<String> {
    let row = &grid["rows"][(day - 1) as usize];
    row["cells"]
        .as_array()?
        .iter()
        .find(|cell| cell["column"] == column)?
        .get("reservation")?
        .get("reservationId")?
        .as_str()
        .map(str::to_string)
}

//! Integration tests for health, suites, occupancy and settings endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{create_test_app, empty_request, parse_response_body, seeded_store, test_config};
use tower::ServiceExt;

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(test_config(), seeded_store());

    let response = app
        .oneshot(empty_request(Method::GET, "/api/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"]["backend"], "memory");
    assert_eq!(body["store"]["connected"], true);
}

#[tokio::test]
async fn test_readiness_fails_when_store_down() {
    let store = seeded_store();
    store.set_fail_reads(true);
    let app = create_test_app(test_config(), store);

    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/health/ready"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = app
        .oneshot(empty_request(Method::GET, "/api/health/live"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_echoed() {
    let app = create_test_app(test_config(), seeded_store());

    let request = axum::http::Request::builder()
        .uri("/api/health/live")
        .header("x-request-id", "req-42")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn test_list_suites_sorted_by_name() {
    let app = create_test_app(test_config(), seeded_store());

    let response = app
        .oneshot(empty_request(Method::GET, "/api/v1/suites"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["suites"][0]["name"], "Azul");
    assert_eq!(body["suites"][1]["name"], "Verde");
}

#[tokio::test]
async fn test_list_suites_store_unavailable() {
    let store = seeded_store();
    store.set_fail_reads(true);
    let app = create_test_app(test_config(), store);

    let response = app
        .oneshot(empty_request(Method::GET, "/api/v1/suites"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "service_unavailable");
}

#[tokio::test]
async fn test_occupancy_for_day() {
    let app = create_test_app(test_config(), seeded_store());

    let response = app
        .oneshot(empty_request(
            Method::GET,
            "/api/v1/occupancy/today?day=2024-03-11",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["totalSuites"], 2);
    assert_eq!(body["occupied"], 1);
    assert_eq!(body["percentage"], 50);
    assert_eq!(body["occupiedSuiteIds"][0], "s1");
}

#[tokio::test]
async fn test_display_settings() {
    let config = villa_araca_api::config::Config::load_for_test(&[("display.language", "it")])
        .unwrap();
    let app = create_test_app(config, seeded_store());

    let response = app
        .oneshot(empty_request(Method::GET, "/api/v1/settings/display"))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["language"], "it");
    assert_eq!(body["theme"]["sidebarBackground"], "#2D5341");
    assert_eq!(body["theme"]["accentColor"], "#E4B9BE");
}

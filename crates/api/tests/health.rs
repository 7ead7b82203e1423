//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{body_json, get, Fakes, Mode};
use tower::ServiceExt;

#[tokio::test]
async fn health_check_reports_every_backend() {
    let fakes = Fakes::all(Mode::Stocked);
    let response = get(fakes.app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["backends"]["mongo"], true);
    assert_eq!(json["backends"]["cassandra"], true);
    assert_eq!(json["backends"]["sql"], true);
}

#[tokio::test]
async fn unreachable_backend_degrades_health() {
    let fakes = Fakes::new(Mode::Stocked, Mode::Failing, Mode::Stocked);
    let response = get(fakes.app(), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["backends"]["cassandra"], false);
    assert_eq!(json["backends"]["mongo"], true);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let fakes = Fakes::all(Mode::Stocked);
    let response = get(fakes.app(), "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("GET /this-route-does-not-exist"));
}

#[tokio::test]
async fn unknown_panel_uses_the_json_error_envelope() {
    let fakes = Fakes::all(Mode::Stocked);
    let response = get(fakes.app(), "/api/v1/panels/best-soundtrack").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(fakes.total_calls(), 0);
}

#[tokio::test]
async fn cors_exposes_the_request_id() {
    let fakes = Fakes::all(Mode::Stocked);
    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = fakes.app().oneshot(request).await.unwrap();

    let exposed = response
        .headers()
        .get(header::ACCESS_CONTROL_EXPOSE_HEADERS)
        .expect("CORS response must expose headers");
    assert!(exposed.to_str().unwrap().contains("x-request-id"));
}

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let fakes = Fakes::all(Mode::Stocked);
    let response = get(fakes.app(), "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

//! End-to-end tests for the HTTP API, driven through the router with
//! `tower::ServiceExt::oneshot` so no socket is bound.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use server::{build_router, ServerConfig, ServerState};
use tower::ServiceExt;

fn app() -> Router {
    let state = ServerState::new(ServerConfig::default()).expect("default state");
    build_router(Arc::new(state))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, value)
}

async fn report_backpack(app: &Router) -> u64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/lost-items",
        Some(json!({
            "user_id": 1,
            "item_type": "Backpack",
            "color": "Black",
            "lost_location": "Main Library",
            "lost_time_from": "2024-01-01 08:00:00",
            "lost_time_to": "2024-01-01 18:00:00",
            "secret_info_1": "blue42",
            "secret_info_2": "room9"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Lost item reported successfully");
    body["lost_item_id"].as_u64().unwrap()
}

async fn log_found(
    app: &Router,
    item_type: &str,
    color: &str,
    location: &str,
    time: &str,
) -> u64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/found-items",
        Some(json!({
            "admin_id": 9,
            "item_type": item_type,
            "color": color,
            "found_location": location,
            "found_time": time
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["found_item_id"].as_u64().unwrap()
}

#[tokio::test]
async fn health_and_info_are_public() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["api_version"], "v1");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"]["lost_items"], 0);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}

#[tokio::test]
async fn lost_item_listing_never_exposes_secrets() {
    let app = app();
    report_backpack(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/lost-items", None).await;
    assert_eq!(status, StatusCode::OK);
    let text = body.to_string();
    assert!(!text.contains("blue42"));
    assert!(!text.contains("room9"));
    assert_eq!(body[0]["item_type"], "Backpack");
    assert_eq!(body[0]["status"], "open");

    let (_, mine) = send(&app, Method::GET, "/api/v1/lost-items/user/1", None).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
    let (_, theirs) = send(&app, Method::GET, "/api/v1/lost-items/user/2", None).await;
    assert!(theirs.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_required_fields_are_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/lost-items",
        Some(json!({ "user_id": 1, "lost_location": "Library" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/found-items",
        Some(json!({ "admin_id": 9, "item_type": "phone", "found_location": "Gym" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/claims",
        Some(json!({ "lost_item_id": 1, "claimer_id": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/lost-items")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn matches_are_ranked_and_filtered() {
    let app = app();
    let lost_id = report_backpack(&app).await;
    let exact = log_found(&app, "backpack", "black", "Library", "2024-01-01T12:00:00Z").await;
    let wrong_color = log_found(&app, "Backpack", "red", "library", "2024-01-01T13:00:00Z").await;
    log_found(&app, "phone", "black", "Main Library", "2024-01-01T12:00:00Z").await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/lost-items/{lost_id}/matches"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let matches = body.as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["found_item"]["id"], exact);
    assert_eq!(matches[0]["score"], 100);
    assert_eq!(matches[1]["found_item"]["id"], wrong_color);
    assert_eq!(matches[1]["score"], 80);
    assert!(matches[0].get("explanation").is_none());

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/lost-items/{lost_id}/matches?explain=true&limit=1"),
        None,
    )
    .await;
    let matches = body.as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["explanation"]["type_match"], true);
}

#[tokio::test]
async fn matches_for_unknown_lost_item_is_404() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/v1/lost-items/77/matches", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn zero_limit_is_bad_request() {
    let app = app();
    let lost_id = report_backpack(&app).await;
    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/v1/lost-items/{lost_id}/matches?limit=0"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn claims_are_verified_or_pending() {
    let app = app();
    let lost_id = report_backpack(&app).await;
    let found_id = log_found(&app, "backpack", "black", "Library", "2024-01-01T12:00:00Z").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/claims",
        Some(json!({
            "lost_item_id": lost_id,
            "found_item_id": found_id,
            "claimer_id": 1,
            "verification_input_1": "blue42",
            "verification_input_2": "room9"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "verified");
    assert_eq!(body["message"], "Claim created successfully");

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/v1/claims",
        Some(json!({
            "lost_item_id": lost_id,
            "found_item_id": found_id,
            "claimer_id": 2,
            "verification_input_1": "blue42",
            "verification_input_2": "ROOM9"
        })),
    )
    .await;
    assert_eq!(body["status"], "pending");

    let (status, claims) = send(
        &app,
        Method::GET,
        &format!("/api/v1/found-items/{found_id}/claims"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(claims.as_array().unwrap().len(), 2);
    assert!(!claims.to_string().contains("blue42"));
}

#[tokio::test]
async fn claim_against_unknown_lost_item_is_404() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/claims",
        Some(json!({
            "lost_item_id": 999,
            "found_item_id": 1,
            "claimer_id": 1,
            "verification_input_1": "a",
            "verification_input_2": "b"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, ready) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(ready["store"]["claims"], 0);
}

#[tokio::test]
async fn claimed_items_leave_the_available_list() {
    let app = app();
    let lost_id = report_backpack(&app).await;
    let found_id = log_found(&app, "backpack", "black", "Library", "2024-01-01T12:00:00Z").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/found-items/{found_id}/status"),
        Some(json!({ "status": "claimed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "claimed");

    let (_, available) = send(&app, Method::GET, "/api/v1/found-items", None).await;
    assert!(available.as_array().unwrap().is_empty());

    let (_, matches) = send(
        &app,
        Method::GET,
        &format!("/api/v1/lost-items/{lost_id}/matches"),
        None,
    )
    .await;
    assert!(matches.as_array().unwrap().is_empty());

    let (status, record) = send(
        &app,
        Method::GET,
        &format!("/api/v1/found-items/{found_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["status"], "claimed");
}

#[tokio::test]
async fn unknown_found_item_routes_are_404() {
    let app = app();
    let (status, _) = send(&app, Method::GET, "/api/v1/found-items/5", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/found-items/5/status",
        Some(json!({ "status": "returned" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::GET, "/api/v1/found-items/5/claims", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_path_id_is_bad_request() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/v1/lost-items/abc/matches", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Route not found");
}

#[tokio::test]
async fn metrics_without_recorder_reports_uptime() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["uptime_seconds"].is_u64());
}

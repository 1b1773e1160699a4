//! HTTP-level integration tests for the `/validation` endpoints.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router.

mod common;

use axum::http::StatusCode;
use chrono::{Days, Local};
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;

fn hospital() -> serde_json::Value {
    json!({
        "name": "City Care Hospital",
        "email": "contact@citycare.in",
        "phone": "9876543210",
        "address": "12 MG Road, Indiranagar",
        "city": "Bengaluru",
        "state": "Karnataka",
        "pincode": "560001"
    })
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/validation/specs describes every spec
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_specs() {
    let response = get(build_test_app(), "/api/v1/validation/specs").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().expect("data should be an array");
    assert_eq!(data.len(), 24);

    let register = data
        .iter()
        .find(|s| s["entity"] == "auth" && s["action"] == "register")
        .expect("auth/register should be listed");
    assert!(register["fields"]
        .as_array()
        .unwrap()
        .iter()
        .any(|f| f["name"] == "confirmPassword"));
    assert_eq!(register["refinements"][0]["path"], "confirmPassword");
}

// ---------------------------------------------------------------------------
// Test: accepted records come back normalized
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_validate_accepts_and_normalizes() {
    let mut input = hospital();
    input["unexpected"] = json!("dropped");

    let response = post_json(build_test_app(), "/api/v1/validation/hospital/create", input).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["type"], "hospital");
    assert_eq!(json["data"]["emergencyServices"], false);
    assert!(json["data"].get("unexpected").is_none());
}

// ---------------------------------------------------------------------------
// Test: rejected records return 422 with per-field details
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_validate_rejects_with_details() {
    let mut input = hospital();
    input["pincode"] = json!("12345");

    let response = post_json(build_test_app(), "/api/v1/validation/hospital/create", input).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Pincode must be 6 digits");
    let details = json["details"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["path"], "pincode");
}

#[tokio::test]
async fn test_register_password_mismatch() {
    let response = post_json(
        build_test_app(),
        "/api/v1/validation/auth/register",
        json!({
            "name": "Priya Sharma",
            "email": "priya.sharma@example.com",
            "phone": "9876501234",
            "password": "Abcdef1!",
            "confirmPassword": "different",
            "agreeToTerms": true
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["details"][0]["path"], "confirmPassword");
    assert_eq!(json["details"][0]["kind"], "refinement");
}

// ---------------------------------------------------------------------------
// Test: appointment dates are judged against the server's current day
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_appointment_in_the_past_is_rejected() {
    let yesterday = Local::now().date_naive() - Days::new(1);
    let response = post_json(
        build_test_app(),
        "/api/v1/validation/appointment/reschedule",
        json!({
            "appointmentDate": yesterday.format("%Y-%m-%d").to_string(),
            "startTime": "10:00"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["details"][0]["path"], "appointmentDate");
}

// ---------------------------------------------------------------------------
// Test: selector errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_unknown_entity_is_bad_request() {
    let response = post_json(build_test_app(), "/api/v1/validation/pharmacy/create", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_unsupported_pair_is_not_found() {
    let response = post_json(build_test_app(), "/api/v1/validation/auth/create", json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_non_object_body_is_rejected() {
    let response = post_json(
        build_test_app(),
        "/api/v1/validation/auth/login",
        json!(["not", "a", "record"]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["details"][0]["path"], "");
}

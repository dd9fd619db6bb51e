use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use portal_core::models::{
    ack::WriteAck,
    booking::{Booking, CreateBookingRequest},
    user::Role,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::test_utils::{bearer, TestContext};

const DATE: &str = "Jan 1, 2024";
const EARLY: &str = "09.00 AM - 09.30 AM";
const LATE: &str = "10.00 AM - 10.30 AM";

fn cleaning(email: &str, slot: &str) -> CreateBookingRequest {
    CreateBookingRequest {
        treatment: "Teeth Cleaning".to_string(),
        appointment_date: DATE.to_string(),
        slot: slot.to_string(),
        email: email.to_string(),
        patient: Some("Test Patient".to_string()),
        phone: Some("555-0100".to_string()),
    }
}

async fn book(ctx: &TestContext, request: &CreateBookingRequest) -> Uuid {
    ctx.server
        .post("/bookings")
        .json(request)
        .await
        .json::<WriteAck>()
        .inserted_id
        .unwrap()
}

#[tokio::test]
async fn test_create_booking_acknowledges_with_id() {
    let ctx = TestContext::new();

    let response = ctx.server.post("/bookings").json(&cleaning("a@x.com", EARLY)).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["acknowledged"], true);
    assert!(body["insertedId"].is_string());
}

#[tokio::test]
async fn test_second_booking_same_treatment_and_day_is_rejected() {
    let ctx = TestContext::new();
    book(&ctx, &cleaning("a@x.com", EARLY)).await;

    let response = ctx.server.post("/bookings").json(&cleaning("a@x.com", LATE)).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let ack = response.json::<WriteAck>();
    assert!(!ack.acknowledged);
    assert_eq!(ack.inserted_id, None);
    let message = ack.message.unwrap();
    assert!(message.contains("Teeth Cleaning"));
    assert!(message.contains(DATE));
    assert!(message.contains(LATE));
}

#[tokio::test]
async fn test_taken_slot_is_rejected_for_another_patient() {
    let ctx = TestContext::new();
    book(&ctx, &cleaning("a@x.com", EARLY)).await;

    let ack = ctx
        .server
        .post("/bookings")
        .json(&cleaning("b@x.com", EARLY))
        .await
        .json::<WriteAck>();

    assert!(!ack.acknowledged);
    assert!(ack.message.unwrap().contains("no longer available"));
}

#[tokio::test]
async fn test_incomplete_booking_is_bad_request() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/bookings")
        .json(&json!({
            "treatment": "Teeth Cleaning",
            "appointmentDate": DATE,
            "slot": "",
            "email": "a@x.com"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Validation error: slot is required");
}

#[tokio::test]
async fn test_list_bookings_requires_token() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/bookings")
        .add_query_param("email", "a@x.com")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["error"],
        "Authentication error: unauthorized access"
    );
}

#[tokio::test]
async fn test_list_bookings_for_own_email() {
    let ctx = TestContext::new();
    let token = ctx.login("a@x.com", Role::User).await;
    book(&ctx, &cleaning("a@x.com", EARLY)).await;
    book(&ctx, &cleaning("b@x.com", LATE)).await;

    let response = bearer(ctx.server.get("/bookings"), &token)
        .add_query_param("email", "a@x.com")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let bookings = response.json::<Vec<Booking>>();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].email, "a@x.com");
    assert_eq!(bookings[0].slot, EARLY);
}

#[tokio::test]
async fn test_list_bookings_for_other_email_is_forbidden() {
    let ctx = TestContext::new();
    let token = ctx.login("a@x.com", Role::User).await;

    let response = bearer(ctx.server.get("/bookings"), &token)
        .add_query_param("email", "b@x.com")
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_booking_by_owner_and_admin() {
    let ctx = TestContext::new();
    let owner = ctx.login("a@x.com", Role::User).await;
    let stranger = ctx.login("b@x.com", Role::User).await;
    let admin = ctx.login("admin@x.com", Role::Admin).await;
    let id = book(&ctx, &cleaning("a@x.com", EARLY)).await;
    let path = format!("/bookings/{id}");

    let response = bearer(ctx.server.get(&path), &owner).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Booking>().id, id);

    let response = bearer(ctx.server.get(&path), &admin).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = bearer(ctx.server.get(&path), &stranger).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_unknown_booking_is_not_found() {
    let ctx = TestContext::new();
    let token = ctx.login("a@x.com", Role::User).await;

    let response = bearer(ctx.server.get(&format!("/bookings/{}", Uuid::new_v4())), &token).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use portal_core::{
    models::{
        ack::WriteAck,
        payment::{CreatePaymentIntentRequest, CreatePaymentRequest, PaymentIntentResponse},
        user::Role,
    },
    store::AppointmentStore,
};
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::{bearer, RecordingProcessor, TestContext};

/// Books Cavity Protection (catalog price 99.99) for `email`.
async fn booked(ctx: &TestContext, email: &str) -> Uuid {
    ctx.server
        .post("/bookings")
        .json(&json!({
            "treatment": "Cavity Protection",
            "appointmentDate": "Jan 1, 2024",
            "slot": "11.00 AM - 11.30 AM",
            "email": email
        }))
        .await
        .json::<WriteAck>()
        .inserted_id
        .unwrap()
}

fn payment(booking_id: Uuid, transaction_id: &str) -> CreatePaymentRequest {
    CreatePaymentRequest {
        booking_id,
        transaction_id: transaction_id.to_string(),
    }
}

#[tokio::test]
async fn test_intent_is_sized_from_stored_price() {
    let ctx = TestContext::new();
    let token = ctx.login("a@x.com", Role::User).await;
    let booking_id = booked(&ctx, "a@x.com").await;

    let response = bearer(ctx.server.post("/create-payment-intent"), &token)
        .json(&CreatePaymentIntentRequest { booking_id })
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<PaymentIntentResponse>().client_secret,
        "pi_9999_secret"
    );
    assert_eq!(*ctx.payments.amounts.lock().unwrap(), vec![9999]);
}

#[tokio::test]
async fn test_intent_for_someone_elses_booking_is_forbidden() {
    let ctx = TestContext::new();
    let token = ctx.login("b@x.com", Role::User).await;
    let booking_id = booked(&ctx, "a@x.com").await;

    let response = bearer(ctx.server.post("/create-payment-intent"), &token)
        .json(&CreatePaymentIntentRequest { booking_id })
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert!(ctx.payments.amounts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_intent_for_unknown_booking_is_not_found() {
    let ctx = TestContext::new();
    let token = ctx.login("a@x.com", Role::User).await;

    let response = bearer(ctx.server.post("/create-payment-intent"), &token)
        .json(&CreatePaymentIntentRequest {
            booking_id: Uuid::new_v4(),
        })
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_processor_failure_is_bad_gateway() {
    let ctx = TestContext::with_processor(RecordingProcessor {
        fail: true,
        ..RecordingProcessor::default()
    });
    let token = ctx.login("a@x.com", Role::User).await;
    let booking_id = booked(&ctx, "a@x.com").await;

    let response = bearer(ctx.server.post("/create-payment-intent"), &token)
        .json(&CreatePaymentIntentRequest { booking_id })
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_recording_payment_marks_booking_paid() {
    let ctx = TestContext::new();
    let token = ctx.login("a@x.com", Role::User).await;
    let booking_id = booked(&ctx, "a@x.com").await;

    let response = bearer(ctx.server.post("/payments"), &token)
        .json(&payment(booking_id, "pi_123"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let ack = response.json::<WriteAck>();
    assert!(ack.acknowledged);

    let stored = ctx.store.booking_by_id(booking_id).await.unwrap().unwrap();
    assert!(stored.paid);
    assert_eq!(stored.transaction_id.as_deref(), Some("pi_123"));
    let payments = ctx.store.payments().await;
    assert_eq!(payments.len(), 1);
    assert_eq!(Some(payments[0].id), ack.inserted_id);
    assert_eq!(payments[0].email, "a@x.com");
    assert_eq!(payments[0].price, 99.99);

    let again = bearer(ctx.server.post("/create-payment-intent"), &token)
        .json(&CreatePaymentIntentRequest { booking_id })
        .await;
    assert_eq!(again.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_payment_without_transaction_id_is_bad_request() {
    let ctx = TestContext::new();
    let token = ctx.login("a@x.com", Role::User).await;
    let booking_id = booked(&ctx, "a@x.com").await;

    let response = bearer(ctx.server.post("/payments"), &token)
        .json(&payment(booking_id, ""))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(ctx.store.payments().await.is_empty());
}

#[tokio::test]
async fn test_client_supplied_price_is_ignored() {
    let ctx = TestContext::new();
    let token = ctx.login("a@x.com", Role::User).await;
    let ack = ctx
        .server
        .post("/bookings")
        .json(&json!({
            "treatment": "Cavity Protection",
            "appointmentDate": "Jan 1, 2024",
            "slot": "11.00 AM - 11.30 AM",
            "email": "a@x.com",
            "price": 0.01
        }))
        .await
        .json::<WriteAck>();
    let booking_id = ack.inserted_id.unwrap();

    let stored = ctx.store.booking_by_id(booking_id).await.unwrap().unwrap();
    assert_eq!(stored.price, 99.99);

    let response = bearer(ctx.server.post("/create-payment-intent"), &token)
        .json(&CreatePaymentIntentRequest { booking_id })
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(*ctx.payments.amounts.lock().unwrap(), vec![9999]);
}

#[tokio::test]
async fn test_booking_unknown_treatment_is_bad_request() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/bookings")
        .json(&json!({
            "treatment": "Teeth Whitening",
            "appointmentDate": "Jan 1, 2024",
            "slot": "11.00 AM - 11.30 AM",
            "email": "a@x.com"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_paid_booking_cannot_be_paid_again() {
    let ctx = TestContext::new();
    let token = ctx.login("a@x.com", Role::User).await;
    let booking_id = booked(&ctx, "a@x.com").await;

    let first = bearer(ctx.server.post("/payments"), &token)
        .json(&payment(booking_id, "pi_1"))
        .await;
    assert_eq!(first.status_code(), StatusCode::OK);

    let second = bearer(ctx.server.post("/payments"), &token)
        .json(&json!({
            "bookingId": booking_id,
            "transactionId": "pi_2",
            "email": "victim@x.com",
            "price": 0.0
        }))
        .await;
    assert_eq!(second.status_code(), StatusCode::BAD_REQUEST);

    let stored = ctx.store.booking_by_id(booking_id).await.unwrap().unwrap();
    assert_eq!(stored.transaction_id.as_deref(), Some("pi_1"));
    let payments = ctx.store.payments().await;
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].email, "a@x.com");
    assert_eq!(payments[0].price, 99.99);
}

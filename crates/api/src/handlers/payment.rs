//! # Payment Handlers
//!
//! Paying for a booking takes two calls. `POST /create-payment-intent` asks
//! the processor for an intent sized to the booking's stored price and
//! returns its client secret. Once the browser has confirmed the payment,
//! `POST /payments` records the transaction and flags the booking as paid.
//!
//! Both calls are limited to the patient who owns the booking, and both
//! refuse a booking that is already paid. The recorded payment always
//! carries the booking's own email and price.

use axum::{extract::State, Json};
use portal_core::{
    auth::{Rule, Subject},
    errors::PortalError,
    models::{
        ack::WriteAck,
        booking::Booking,
        payment::{
            to_minor_units, CreatePaymentIntentRequest, CreatePaymentRequest,
            PaymentIntentResponse,
        },
    },
    store::{AppointmentStore, PaymentStore},
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

async fn owned_booking(state: &ApiState, subject: &Subject, id: Uuid) -> Result<Booking, AppError> {
    let booking = state
        .store
        .booking_by_id(id)
        .await?
        .ok_or_else(|| PortalError::NotFound(format!("Booking with ID {} not found", id)))?;

    Rule::owner(&booking.email).check(subject)?;
    Ok(booking)
}

fn already_paid() -> PortalError {
    PortalError::Validation("booking is already paid".to_string())
}

#[axum::debug_handler]
pub async fn create_payment_intent(
    State(state): State<Arc<ApiState>>,
    AuthUser(subject): AuthUser,
    Json(payload): Json<CreatePaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, AppError> {
    let booking = owned_booking(&state, &subject, payload.booking_id).await?;
    if booking.paid {
        return Err(AppError(already_paid()));
    }

    let intent = state
        .payments
        .create_intent(to_minor_units(booking.price))
        .await?;

    info!(booking_id = %booking.id, intent_id = %intent.id, "Payment intent created");
    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

#[axum::debug_handler]
pub async fn create_payment(
    State(state): State<Arc<ApiState>>,
    AuthUser(subject): AuthUser,
    Json(payload): Json<CreatePaymentRequest>,
) -> Result<Json<WriteAck>, AppError> {
    if payload.transaction_id.trim().is_empty() {
        return Err(AppError(PortalError::Validation(
            "transactionId is required".to_string(),
        )));
    }

    let booking = owned_booking(&state, &subject, payload.booking_id).await?;
    if booking.paid {
        return Err(AppError(already_paid()));
    }

    // A concurrent payment can still win between the check and the update
    let payment = state
        .store
        .record_payment(&booking, &payload.transaction_id)
        .await?
        .ok_or_else(already_paid)?;

    info!(
        booking_id = %payment.booking_id,
        transaction_id = %payment.transaction_id,
        "Payment recorded"
    );
    Ok(Json(WriteAck::inserted(payment.id)))
}

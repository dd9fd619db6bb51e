use axum::{
    extract::{Path, Query, State},
    Json,
};
use portal_core::{
    auth::Rule,
    booking::place_booking,
    errors::PortalError,
    models::{
        ack::WriteAck,
        booking::{Booking, BookingsQuery, CreateBookingRequest},
    },
    store::AppointmentStore,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{auth::AuthUser, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<WriteAck>, AppError> {
    let ack = place_booking(state.store.as_ref(), &payload).await?;

    if ack.acknowledged {
        info!(
            treatment = %payload.treatment,
            date = %payload.appointment_date,
            slot = %payload.slot,
            "Booking created"
        );
    } else {
        info!(
            treatment = %payload.treatment,
            date = %payload.appointment_date,
            slot = %payload.slot,
            "Booking rejected"
        );
    }

    Ok(Json(ack))
}

/// Lists the bookings of `email`; only the owner of that email may ask.
#[axum::debug_handler]
pub async fn get_bookings(
    State(state): State<Arc<ApiState>>,
    AuthUser(subject): AuthUser,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Rule::owner(&query.email).check(&subject)?;

    let bookings = state.store.bookings_by_email(&query.email).await?;
    Ok(Json(bookings))
}

#[axum::debug_handler]
pub async fn get_booking(
    State(state): State<Arc<ApiState>>,
    AuthUser(subject): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .store
        .booking_by_id(id)
        .await?
        .ok_or_else(|| PortalError::NotFound(format!("Booking with ID {} not found", id)))?;

    Rule::owner_or_admin(&booking.email).check(&subject)?;

    Ok(Json(booking))
}

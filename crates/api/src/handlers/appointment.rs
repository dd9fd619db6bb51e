//! # Appointment Handlers
//!
//! Read-only views of the treatment catalog. `GET /appointmentOptions`
//! returns every treatment with only the slots still free on the requested
//! date; the computation itself lives in `portal_core::availability`.

use axum::{
    extract::{Query, State},
    Json,
};
use portal_core::{
    availability,
    errors::PortalError,
    models::appointment::{AppointmentOption, AvailabilityQuery, SpecialtyResponse},
    store::AppointmentStore,
};
use std::sync::Arc;

use crate::{middleware::error_handling::AppError, ApiState};

/// Lists every treatment with the slots still free on `date`.
///
/// # Endpoint
///
/// ```text
/// GET /appointmentOptions?date=Jan 1, 2024
/// ```
///
/// The date is an opaque label matched exactly against stored bookings. It
/// must be present and non-blank; an unrecognised label simply matches no
/// bookings and every slot is reported free.
#[axum::debug_handler]
pub async fn get_appointment_options(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<AppointmentOption>>, AppError> {
    let date = query
        .date
        .filter(|date| !date.trim().is_empty())
        .ok_or_else(|| PortalError::Validation("date query parameter is required".to_string()))?;

    let options = availability::available_options(state.store.as_ref(), &date).await?;

    tracing::debug!(date = %date, options = options.len(), "Resolved availability");
    Ok(Json(options))
}

#[axum::debug_handler]
pub async fn get_specialties(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<SpecialtyResponse>>, AppError> {
    let names = state.store.fetch_option_names().await?;

    Ok(Json(
        names
            .into_iter()
            .map(|name| SpecialtyResponse { name })
            .collect(),
    ))
}

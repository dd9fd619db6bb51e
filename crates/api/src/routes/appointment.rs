use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/appointmentOptions",
            get(handlers::appointment::get_appointment_options),
        )
        .route(
            "/appointmentSpecialty",
            get(handlers::appointment::get_specialties),
        )
}

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/bookings",
            get(handlers::booking::get_bookings).post(handlers::booking::create_booking),
        )
        .route("/bookings/:id", get(handlers::booking::get_booking))
}

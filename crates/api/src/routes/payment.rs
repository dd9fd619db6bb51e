use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/create-payment-intent",
            post(handlers::payment::create_payment_intent),
        )
        .route("/payments", post(handlers::payment::create_payment))
}

use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/doctors",
            get(handlers::doctor::list_doctors).post(handlers::doctor::create_doctor),
        )
        .route("/doctors/:id", delete(handlers::doctor::delete_doctor))
}

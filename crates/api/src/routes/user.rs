use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/jwt", get(handlers::user::issue_token))
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        // GET takes the user's email, PUT the user's id
        .route(
            "/users/admin/:user",
            get(handlers::user::get_admin_status).put(handlers::user::make_admin),
        )
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use portal_core::{
    errors::PortalError,
    models::{
        ack::WriteAck,
        user::{AdminStatusResponse, CreateUserRequest, Role, TokenQuery, TokenResponse, User},
    },
    store::UserStore,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    middleware::{auth::AdminUser, error_handling::AppError},
    ApiState,
};

/// Issues an access token for a registered user.
///
/// Unknown emails get `403` with an empty `accessToken` rather than an
/// error body, so clients can treat the response shape uniformly.
#[axum::debug_handler]
pub async fn issue_token(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<TokenQuery>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let user = state.store.find_user_by_email(&query.email).await?;

    match user {
        Some(user) => {
            let access_token = state.tokens.issue(&user.email)?;
            info!(email = %user.email, "Access token issued");
            Ok((StatusCode::OK, Json(TokenResponse { access_token })))
        }
        None => {
            warn!(email = %query.email, "Access token requested for unknown user");
            Ok((
                StatusCode::FORBIDDEN,
                Json(TokenResponse {
                    access_token: String::new(),
                }),
            ))
        }
    }
}

#[axum::debug_handler]
pub async fn list_users(State(state): State<Arc<ApiState>>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<WriteAck>, AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError(PortalError::Validation("email is required".to_string())));
    }

    let ack = match state.store.insert_user(&payload).await? {
        Some(user) => {
            info!(email = %user.email, "User registered");
            WriteAck::inserted(user.id)
        }
        None => WriteAck::rejected(format!("User {} already exists", payload.email)),
    };

    Ok(Json(ack))
}

#[axum::debug_handler]
pub async fn get_admin_status(
    State(state): State<Arc<ApiState>>,
    Path(email): Path<String>,
) -> Result<Json<AdminStatusResponse>, AppError> {
    let is_admin = state
        .store
        .find_user_by_email(&email)
        .await?
        .is_some_and(|user| user.role == Role::Admin);

    Ok(Json(AdminStatusResponse { is_admin }))
}

#[axum::debug_handler]
pub async fn make_admin(
    State(state): State<Arc<ApiState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<WriteAck>, AppError> {
    let updated = state.store.set_role(id, Role::Admin).await?;
    let count = u64::from(updated);

    info!(by = %admin.email, user_id = %id, updated, "Admin role granted");
    Ok(Json(WriteAck::updated(count, count)))
}

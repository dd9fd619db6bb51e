use axum::{
    extract::{Path, State},
    Json,
};
use portal_core::{
    errors::PortalError,
    models::{
        ack::WriteAck,
        doctor::{CreateDoctorRequest, Doctor},
    },
    store::DoctorStore,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::{
    middleware::{auth::AdminUser, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<ApiState>>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<Vec<Doctor>>, AppError> {
    let doctors = state.store.list_doctors().await?;
    Ok(Json(doctors))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<ApiState>>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateDoctorRequest>,
) -> Result<Json<WriteAck>, AppError> {
    for (field, value) in [
        ("name", &payload.name),
        ("email", &payload.email),
        ("specialty", &payload.specialty),
    ] {
        if value.trim().is_empty() {
            return Err(AppError(PortalError::Validation(format!("{field} is required"))));
        }
    }

    let doctor = state.store.insert_doctor(&payload).await?;

    info!(by = %admin.email, doctor_id = %doctor.id, "Doctor added");
    Ok(Json(WriteAck::inserted(doctor.id)))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<Arc<ApiState>>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<WriteAck>, AppError> {
    let deleted = state.store.delete_doctor(id).await?;

    info!(by = %admin.email, doctor_id = %id, deleted, "Doctor removed");
    Ok(Json(WriteAck::deleted(u64::from(deleted))))
}

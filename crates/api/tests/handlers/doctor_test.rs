use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use portal_core::models::{
    ack::WriteAck,
    doctor::{CreateDoctorRequest, Doctor},
    user::Role,
};

use crate::test_utils::{bearer, TestContext};

fn dentist(name: &str) -> CreateDoctorRequest {
    CreateDoctorRequest {
        name: name.to_string(),
        email: format!("{}@clinic.com", name.to_lowercase()),
        specialty: "Teeth Cleaning".to_string(),
        image: None,
    }
}

#[tokio::test]
async fn test_admin_manages_roster() {
    let ctx = TestContext::new();
    let admin = ctx.login("admin@x.com", Role::Admin).await;

    let ack = bearer(ctx.server.post("/doctors"), &admin)
        .json(&dentist("Grey"))
        .await
        .json::<WriteAck>();
    assert!(ack.acknowledged);
    let id = ack.inserted_id.unwrap();

    let doctors = bearer(ctx.server.get("/doctors"), &admin).await.json::<Vec<Doctor>>();
    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0].id, id);
    assert_eq!(doctors[0].email, "grey@clinic.com");

    let deleted = bearer(ctx.server.delete(&format!("/doctors/{id}")), &admin)
        .await
        .json::<WriteAck>();
    assert_eq!(deleted, WriteAck::deleted(1));

    let again = bearer(ctx.server.delete(&format!("/doctors/{id}")), &admin)
        .await
        .json::<WriteAck>();
    assert_eq!(again, WriteAck::deleted(0));
}

#[tokio::test]
async fn test_doctor_without_specialty_is_bad_request() {
    let ctx = TestContext::new();
    let admin = ctx.login("admin@x.com", Role::Admin).await;
    let mut request = dentist("Grey");
    request.specialty = String::new();

    let response = bearer(ctx.server.post("/doctors"), &admin).json(&request).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_roster_is_admin_only() {
    let ctx = TestContext::new();
    let token = ctx.login("a@x.com", Role::User).await;

    let response = bearer(ctx.server.get("/doctors"), &token).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = bearer(ctx.server.post("/doctors"), &token)
        .json(&dentist("Grey"))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = ctx.server.get("/doctors").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

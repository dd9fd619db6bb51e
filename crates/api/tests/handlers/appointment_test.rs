use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use portal_core::models::{
    appointment::{AppointmentOption, SpecialtyResponse},
    booking::CreateBookingRequest,
};
use serde_json::Value;

use crate::test_utils::{catalog, TestContext};

fn booking(treatment: &str, date: &str, slot: &str, email: &str) -> CreateBookingRequest {
    CreateBookingRequest {
        treatment: treatment.to_string(),
        appointment_date: date.to_string(),
        slot: slot.to_string(),
        email: email.to_string(),
        patient: Some("Test Patient".to_string()),
        phone: None,
    }
}

fn slots_of<'a>(options: &'a [AppointmentOption], name: &str) -> &'a [String] {
    &options.iter().find(|o| o.name == name).unwrap().slots
}

#[tokio::test]
async fn test_root_reports_running() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "doctors portal server is running");
}

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_all_slots_free_without_bookings() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get("/appointmentOptions")
        .add_query_param("date", "Jan 1, 2024")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let options = response.json::<Vec<AppointmentOption>>();
    let expected = catalog();
    assert_eq!(options.len(), expected.len());
    for (got, want) in options.iter().zip(&expected) {
        assert_eq!(got.name, want.name);
        assert_eq!(got.price, want.price);
        assert_eq!(got.slots, want.slots);
    }
}

#[tokio::test]
async fn test_booked_slot_is_hidden_for_that_date_only() {
    let ctx = TestContext::new();

    ctx.server
        .post("/bookings")
        .json(&booking("Teeth Cleaning", "Jan 1, 2024", "09.00 AM - 09.30 AM", "a@x.com"))
        .await;

    let same_day = ctx
        .server
        .get("/appointmentOptions")
        .add_query_param("date", "Jan 1, 2024")
        .await
        .json::<Vec<AppointmentOption>>();
    assert_eq!(slots_of(&same_day, "Teeth Cleaning"), ["10.00 AM - 10.30 AM"]);
    assert_eq!(
        slots_of(&same_day, "Cavity Protection"),
        ["09.00 AM - 09.30 AM", "11.00 AM - 11.30 AM"]
    );

    let next_day = ctx
        .server
        .get("/appointmentOptions")
        .add_query_param("date", "Jan 2, 2024")
        .await
        .json::<Vec<AppointmentOption>>();
    assert_eq!(
        slots_of(&next_day, "Teeth Cleaning"),
        ["09.00 AM - 09.30 AM", "10.00 AM - 10.30 AM"]
    );
}

#[tokio::test]
async fn test_missing_date_is_rejected() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/appointmentOptions").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = ctx
        .server
        .get("/appointmentOptions")
        .add_query_param("date", "  ")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["error"].as_str().unwrap().contains("date"));
}

#[tokio::test]
async fn test_specialties_list_names_only() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/appointmentSpecialty").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let names: Vec<String> = response
        .json::<Vec<SpecialtyResponse>>()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, ["Teeth Cleaning", "Cavity Protection"]);
}

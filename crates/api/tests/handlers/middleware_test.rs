use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use portal_api::middleware::{auth::TokenIssuer, error_handling::AppError};
use portal_core::errors::PortalError;
use portal_db::mock::repositories::MockPortalStore;
use rstest::rstest;
use serde_json::Value;

use crate::test_utils::{bearer, server_for, RecordingProcessor, TestContext, TOKEN_SECRET};

#[rstest]
#[case(PortalError::NotFound("Resource not found".to_string()), StatusCode::NOT_FOUND)]
#[case(PortalError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(PortalError::Authentication("unauthorized access".to_string()), StatusCode::UNAUTHORIZED)]
#[case(PortalError::Authorization("forbidden access".to_string()), StatusCode::FORBIDDEN)]
#[case(PortalError::Payment("card declined".to_string()), StatusCode::BAD_GATEWAY)]
#[case(PortalError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    PortalError::Internal(Box::new(std::io::Error::other("Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: PortalError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();
    assert_eq!(response.status(), expected);
}

#[test_log::test(tokio::test)]
async fn test_garbage_token_is_forbidden() {
    let ctx = TestContext::new();

    let response = bearer(ctx.server.get("/bookings"), "not-a-token")
        .add_query_param("email", "a@x.com")
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(
        response.json::<Value>()["error"],
        "Authorization error: forbidden access"
    );
}

#[test_log::test(tokio::test)]
async fn test_expired_token_is_forbidden() {
    let ctx = TestContext::new();
    let token = ctx
        .tokens
        .issue_at("a@x.com", Utc::now() - Duration::hours(2))
        .unwrap();

    let response = bearer(ctx.server.get("/bookings"), &token)
        .add_query_param("email", "a@x.com")
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn test_token_signed_with_other_secret_is_forbidden() {
    let ctx = TestContext::new();
    let token = TokenIssuer::new("someone-else", Duration::hours(1))
        .issue("a@x.com")
        .unwrap();

    let response = bearer(ctx.server.get("/bookings"), &token)
        .add_query_param("email", "a@x.com")
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn test_store_failure_is_internal_error() {
    let mut store = MockPortalStore::new();
    store
        .expect_fetch_all_options()
        .times(1)
        .returning(|| Err(eyre::eyre!("connection refused")));

    let server = server_for(
        Arc::new(store),
        Arc::new(RecordingProcessor::default()),
        TokenIssuer::new(TOKEN_SECRET, Duration::hours(1)),
    );

    let response = server
        .get("/appointmentOptions")
        .add_query_param("date", "Jan 1, 2024")
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.json::<Value>()["error"]
        .as_str()
        .unwrap()
        .starts_with("Database error"));
}

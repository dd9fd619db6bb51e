//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and a JSON body of the form
//! `{"error": "<message>"}` so every endpoint fails the same way.
//!
//! Business rejections such as a duplicate booking are not errors; they are
//! returned as a `WriteAck` with `acknowledged: false`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use portal_core::errors::PortalError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use portal_api::middleware::error_handling::AppError;
/// use portal_core::errors::PortalError;
///
/// async fn handler(date: Option<String>) -> Result<Json<String>, AppError> {
///     let date = date.ok_or_else(|| PortalError::Validation("date is required".to_string()))?;
///     Ok(Json(date))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub PortalError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PortalError::NotFound(_) => StatusCode::NOT_FOUND,
            PortalError::Validation(_) => StatusCode::BAD_REQUEST,
            PortalError::Authentication(_) => StatusCode::UNAUTHORIZED,
            PortalError::Authorization(_) => StatusCode::FORBIDDEN,
            PortalError::Payment(_) => StatusCode::BAD_GATEWAY,
            PortalError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PortalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

impl From<PortalError> for AppError {
    fn from(err: PortalError) -> Self {
        AppError(err)
    }
}

/// Store failures arrive as `eyre::Report` and are reported as database errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(PortalError::Database(err))
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use flightdesk_core::ValidationErrors;

/// Errors a booking request can surface to the client. Dispatch failures are not among them:
/// they become an error redirect instead.
#[derive(Debug)]
pub enum AppError {
    Validation(ValidationErrors),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                let body = Json(json!({
                    "ok": false,
                    "errors": errors,
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

use axum::{
    extract::{rejection::FormRejection, Form, State},
    response::Redirect,
    routing::post,
    Router,
};
use std::collections::HashMap;
use flightdesk_core::{validate, BookingSubmission};
use uuid::Uuid;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/send_booking", post(send_booking))
}

/// POST /send_booking
/// Validates the booking form, emails it to the operator and redirects to the status page.
#[tracing::instrument(name = "booking_request", skip_all, fields(request_id = %Uuid::new_v4()))]
async fn send_booking(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Redirect, AppError> {
    // An unreadable body is an empty submission, not a separate error.
    let raw = match form {
        Ok(Form(fields)) => fields,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Booking form not decodable, treating all fields as absent");
            HashMap::new()
        }
    };

    let submission = BookingSubmission::extract(&raw);
    let booking = validate(submission).map_err(|errors| {
        tracing::warn!(violations = errors.messages().len(), "Booking request rejected: {}", errors);
        AppError::from(errors)
    })?;

    tracing::info!(trip_type = %booking.trip_type(), adults = booking.adults(), "Booking request accepted");

    let outcome = state.notifier.notify(&booking).await;
    Ok(Redirect::to(&state.redirect.location(outcome.redirect_status())))
}

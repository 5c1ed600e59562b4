use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use crate::submission::{BookingSubmission, TripType};

pub const FROM_REQUIRED: &str = "From location is required";
pub const TO_REQUIRED: &str = "To location is required";
pub const DEPARTURE_REQUIRED: &str = "Departure date is required";
pub const TRIP_TYPE_INVALID: &str = "Trip type is invalid";
pub const RETURN_REQUIRED: &str = "Return date is required for round trip";
pub const ADULTS_INVALID: &str = "Adults must be at least 1";
pub const PHONE_REQUIRED: &str = "Phone number is required";

/// Every rule the submission violated, in rule-declaration order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("Validation failed: {}", .0.join("; "))]
#[serde(transparent)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

/// A submission that satisfied every rule. Only [`validate`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    submission: BookingSubmission,
    trip_type: TripType,
    adults: u64,
}

impl ValidatedBooking {
    /// The submitted fields, unchanged by validation.
    pub fn submission(&self) -> &BookingSubmission {
        &self.submission
    }

    pub fn trip_type(&self) -> TripType {
        self.trip_type
    }

    pub fn adults(&self) -> u64 {
        self.adults
    }

    pub fn is_round_trip(&self) -> bool {
        self.trip_type == TripType::RoundTrip
    }
}

/// Decimal number with optional sign, fraction and exponent ("2", "+3", "2.0", "1e3").
static NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").expect("numeric pattern is valid")
});

/// Numeric values are truncated toward zero; counts beyond `u64::MAX` saturate.
fn parse_adult_count(raw: &str) -> Option<u64> {
    if !NUMERIC.is_match(raw) {
        return None;
    }
    let count = raw.parse::<f64>().ok()?.trunc();
    (count >= 1.0).then(|| count as u64)
}

/// Runs every rule against the submission and collects all violations.
pub fn validate(submission: BookingSubmission) -> Result<ValidatedBooking, ValidationErrors> {
    let mut errors = Vec::new();

    if submission.from.is_empty() {
        errors.push(FROM_REQUIRED.to_string());
    }
    if submission.to.is_empty() {
        errors.push(TO_REQUIRED.to_string());
    }
    if submission.departure_date.is_empty() {
        errors.push(DEPARTURE_REQUIRED.to_string());
    }

    let trip_type = TripType::from_form_value(&submission.trip_type);
    if trip_type.is_none() {
        errors.push(TRIP_TYPE_INVALID.to_string());
    }
    if trip_type == Some(TripType::RoundTrip) && submission.return_date.is_empty() {
        errors.push(RETURN_REQUIRED.to_string());
    }

    let adults = parse_adult_count(&submission.adults);
    if adults.is_none() {
        errors.push(ADULTS_INVALID.to_string());
    }
    if submission.phone.is_empty() {
        errors.push(PHONE_REQUIRED.to_string());
    }

    match (trip_type, adults) {
        (Some(trip_type), Some(adults)) if errors.is_empty() => Ok(ValidatedBooking {
            submission,
            trip_type,
            adults,
        }),
        _ => {
            tracing::debug!(violations = errors.len(), "Booking submission rejected");
            Err(ValidationErrors(errors))
        }
    }
}

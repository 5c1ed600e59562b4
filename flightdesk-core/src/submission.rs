use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use flightdesk_shared::mask_tail;
use crate::sanitize::clean_field;

/// Form field names accepted by the booking endpoint.
pub mod fields {
    pub const FLIGHT_SCOPE: &str = "flight_scope";
    pub const TRIP_TYPE: &str = "trip_type";
    pub const FROM: &str = "from";
    pub const TO: &str = "to";
    pub const DEPARTURE_DATE: &str = "departure_date";
    pub const RETURN_DATE: &str = "return_date";
    pub const ADULTS: &str = "adults";
    pub const CHILDREN: &str = "children";
    pub const TRAVEL_CLASS: &str = "travel_class";
    pub const PHONE: &str = "phone";
    pub const ADDITIONAL_REQUIREMENTS: &str = "additional_requirements";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripType {
    OneWay,
    RoundTrip,
}

impl TripType {
    /// Exact, case-sensitive match on the submitted value.
    pub fn from_form_value(value: &str) -> Option<Self> {
        match value {
            "oneway" => Some(TripType::OneWay),
            "roundtrip" => Some(TripType::RoundTrip),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::OneWay => "oneway",
            TripType::RoundTrip => "roundtrip",
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One flight request as submitted, after sanitization. Every field is plain text, possibly empty.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BookingSubmission {
    pub flight_scope: String,
    pub trip_type: String,
    pub from: String,
    pub to: String,
    pub departure_date: String,
    pub return_date: String,
    pub adults: String,
    pub children: String,
    pub travel_class: String,
    pub phone: String,
    pub additional_requirements: String,
}

impl BookingSubmission {
    /// Reads the known fields out of raw form data. Absent keys become empty strings;
    /// present values are stripped of markup and trimmed.
    pub fn extract<S: BuildHasher>(raw: &HashMap<String, String, S>) -> Self {
        let field = |key: &str| raw.get(key).map(|v| clean_field(v)).unwrap_or_default();

        Self {
            flight_scope: field(fields::FLIGHT_SCOPE),
            trip_type: field(fields::TRIP_TYPE),
            from: field(fields::FROM),
            to: field(fields::TO),
            departure_date: field(fields::DEPARTURE_DATE),
            return_date: field(fields::RETURN_DATE),
            adults: field(fields::ADULTS),
            children: field(fields::CHILDREN),
            travel_class: field(fields::TRAVEL_CLASS),
            phone: field(fields::PHONE),
            additional_requirements: field(fields::ADDITIONAL_REQUIREMENTS),
        }
    }
}

impl fmt::Debug for BookingSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingSubmission")
            .field("flight_scope", &self.flight_scope)
            .field("trip_type", &self.trip_type)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("departure_date", &self.departure_date)
            .field("return_date", &self.return_date)
            .field("adults", &self.adults)
            .field("children", &self.children)
            .field("travel_class", &self.travel_class)
            .field("phone", &mask_tail(&self.phone, 3))
            .field("additional_requirements", &self.additional_requirements.len())
            .finish()
    }
}

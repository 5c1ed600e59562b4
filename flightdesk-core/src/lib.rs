pub mod sanitize;
pub mod submission;
pub mod validation;

pub use submission::{BookingSubmission, TripType};
pub use validation::{validate, ValidatedBooking, ValidationErrors};

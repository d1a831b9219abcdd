// HTTP presentation layer

pub mod form;
pub mod pages;
pub mod server;

pub use form::{parse_contact, parse_parameters, validate_parameters, ContactSubmission};
pub use pages::{band_message, prediction_message};
pub use server::{ErrorResponse, PredictionResponse, PredictorServer};

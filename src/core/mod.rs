pub mod error;

pub use error::{FormError, FormErrors, PredictorError, PredictorResult};

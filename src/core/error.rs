use thiserror::Error;

/// A single rejected form field
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("{field}: '{value}' is not a valid number")]
    InvalidNumber { field: String, value: String },

    #[error("{field}: {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} is required")]
    Missing { field: String },
}

impl FormError {
    pub fn field(&self) -> &str {
        match self {
            FormError::InvalidNumber { field, .. }
            | FormError::OutOfRange { field, .. }
            | FormError::Missing { field } => field,
        }
    }
}

/// Every field error found in one submission
#[derive(Error, Debug, Clone, PartialEq, Default)]
#[error("{} invalid field(s): {}", .0.len(), messages(.0))]
pub struct FormErrors(pub Vec<FormError>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, error: FormError) {
        self.0.push(error);
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FormError> {
        self.0.iter()
    }
}

fn messages(errors: &[FormError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<::config::ConfigError> for PredictorError {
    fn from(err: ::config::ConfigError) -> Self {
        PredictorError::ConfigError(err.to_string())
    }
}

pub type PredictorResult<T> = Result<T, PredictorError>;

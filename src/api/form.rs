use std::collections::HashMap;

use crate::core::{FormError, FormErrors};
use crate::ml::{MachineParameters, PARAMETER_CATALOG};

/// Build machine parameters from submitted form fields.
///
/// Blank or missing fields take their catalog default. Every bad field is
/// reported, not just the first one.
pub fn parse_parameters(fields: &HashMap<String, String>) -> Result<MachineParameters, FormErrors> {
    let mut params = MachineParameters::default();
    let mut errors = FormErrors::default();

    for spec in PARAMETER_CATALOG.iter() {
        let raw = match fields.get(spec.name).map(|value| value.trim()) {
            None | Some("") => continue,
            Some(raw) => raw,
        };

        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                if spec.contains(value) {
                    params.set(spec.name, value);
                } else {
                    errors.push(FormError::OutOfRange {
                        field: spec.name.to_string(),
                        value,
                        min: spec.min,
                        max: spec.max,
                    });
                }
            }
            _ => errors.push(FormError::InvalidNumber {
                field: spec.name.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    if errors.is_empty() {
        Ok(params)
    } else {
        Err(errors)
    }
}

/// Check already-typed parameters against the catalog bounds
pub fn validate_parameters(params: &MachineParameters) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();

    for spec in PARAMETER_CATALOG.iter() {
        let Some(value) = params.get(spec.name) else {
            continue;
        };

        if !value.is_finite() {
            errors.push(FormError::InvalidNumber {
                field: spec.name.to_string(),
                value: value.to_string(),
            });
        } else if !spec.contains(value) {
            errors.push(FormError::OutOfRange {
                field: spec.name.to_string(),
                value,
                min: spec.min,
                max: spec.max,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A message sent through the contact form
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn greeting(&self) -> String {
        format!("Hello {}! Your message has been received.", self.name)
    }
}

/// All three contact fields are required and must be non-blank
pub fn parse_contact(fields: &HashMap<String, String>) -> Result<ContactSubmission, FormErrors> {
    let mut errors = FormErrors::default();

    let mut required = |field: &str| -> String {
        match fields.get(field).map(|value| value.trim()) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => {
                errors.push(FormError::Missing {
                    field: field.to_string(),
                });
                String::new()
            }
        }
    };

    let submission = ContactSubmission {
        name: required("name"),
        email: required("email"),
        message: required("message"),
    };

    if errors.is_empty() {
        Ok(submission)
    } else {
        Err(errors)
    }
}

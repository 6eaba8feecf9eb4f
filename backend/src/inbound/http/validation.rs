//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidEmail,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidEmail => "invalid_email",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("missing required field: {name}"),
        ErrorCode::MissingField,
    )
}

pub(crate) fn invalid_email_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("{name} must be a valid email address"),
        ErrorCode::InvalidEmail,
    )
}

/// Require a field to be present and non-blank, returning the trimmed value.
pub(crate) fn require_trimmed(value: Option<String>, field: FieldName) -> Result<String, Error> {
    match value {
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Err(missing_field_error(field))
            } else {
                Ok(trimmed.to_owned())
            }
        }
        None => Err(missing_field_error(field)),
    }
}

//! Error types for the CacheFly client.
//!
//! # Design
//! `MissingId` is a local precondition failure raised before any request is
//! built, so it never reaches a transport. `NotFound` and `Unauthorized` get
//! dedicated variants because callers commonly branch on them; every other
//! non-2xx response lands in `HttpError` with the raw status and body.
//! `Validation` carries the structured per-field entries produced while
//! checking an options update against the service's metadata.

use thiserror::Error;

/// Code attached to every entry for an option name the service does not know.
pub const OPTION_NOT_AVAILABLE: &str = "OPTION_NOT_AVAILABLE";

/// Result type using `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by the CacheFly client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required resource identifier was empty.
    #[error("id is required")]
    MissingId,

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the credentials (401 or 403).
    #[error("unauthorized (HTTP {status}): {body}")]
    Unauthorized { status: u16, body: String },

    /// The server returned any other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The round-trip itself failed (connect, timeout, read).
    #[error("transport error: {0}")]
    Transport(String),

    /// One or more supplied options are unknown to the service.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Missing or invalid configuration values.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// The per-field entries if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&[ValidationErrorEntry]> {
        match self {
            ApiError::Validation(err) => Some(&err.errors),
            _ => None,
        }
    }
}

/// One rejected option key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrorEntry {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationErrorEntry {
    pub fn option_not_available(field: &str) -> Self {
        Self {
            field: field.to_string(),
            code: OPTION_NOT_AVAILABLE.to_string(),
            message: format!("option '{field}' is not available for this service"),
        }
    }
}

/// Aggregate of every rejected key in a single update request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("service options validation failed: {}", list_fields(.errors))]
pub struct ValidationError {
    pub errors: Vec<ValidationErrorEntry>,
}

fn list_fields(entries: &[ValidationErrorEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{} ({})", entry.field, entry.code))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_id_message_is_stable() {
        assert_eq!(ApiError::MissingId.to_string(), "id is required");
    }

    #[test]
    fn validation_display_lists_every_field() {
        let err = ApiError::from(ValidationError {
            errors: vec![
                ValidationErrorEntry::option_not_available("bogus"),
                ValidationErrorEntry::option_not_available("nope"),
            ],
        });
        assert_eq!(
            err.to_string(),
            "service options validation failed: bogus (OPTION_NOT_AVAILABLE), nope (OPTION_NOT_AVAILABLE)"
        );
        assert_eq!(err.validation_errors().map(|e| e.len()), Some(2));
    }

    #[test]
    fn non_validation_errors_have_no_entries() {
        assert!(ApiError::NotFound.validation_errors().is_none());
    }
}

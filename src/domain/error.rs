//! Domain-level error types for gymlog.
//!
//! All errors are typed with `thiserror` and carry enough context to be
//! shown to the user directly.

use std::fmt;

use thiserror::Error;

use super::models::RecordId;

/// A single failed form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name as shown in the form (e.g. `weight`).
    pub field: &'static str,
    /// Message to show next to the field.
    pub message: String,
}

/// Every failing field of one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message for a given field, if it failed.
    #[must_use]
    #[cfg(test)]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// User input rejected by form validation.
    #[error("Invalid input: {errors}")]
    Validation { errors: ValidationErrors },

    /// A persisted record string could not be parsed.
    #[error("Malformed record '{input}': {message}")]
    Parse { input: String, message: String },

    /// A persisted record carries a type tag we do not know.
    #[error("Unknown exercise type: {tag}")]
    UnknownVariant { tag: String },

    /// List index past the end of the list.
    #[error("Index {index} is out of range (list has {len} entries)")]
    IndexOutOfBounds { index: usize, len: usize },

    /// 1-based exercise number outside the list.
    #[error("No exercise number {number} (list has {len} entries)")]
    InvalidNumber { number: usize, len: usize },

    /// No record with this id in the store.
    #[error("No exercise with id {id}")]
    RecordNotFound { id: RecordId },

    /// Failed to open or query the preferences database.
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON rendering failed.
    #[error("JSON format error: {message}")]
    JsonFormat {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl AppError {
    /// Create a database error from rusqlite error.
    pub fn database(err: rusqlite::Error) -> Self {
        Self::Database {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Create a JSON format error.
    pub fn json_format(err: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }

    /// Create a parse error for a record string.
    pub fn parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            message: message.into(),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation { errors }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

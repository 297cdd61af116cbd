//! Custom error types for the decryptor
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions. Decryption failures inside the cell codec
//! never reach callers as errors; they fall back to the raw value instead.

use thiserror::Error;

/// The main error type for decryptor operations
#[derive(Error, Debug)]
pub enum DecryptorError {
    /// Unreadable or corrupt input file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization or archiving failure during export
    #[error("Export error: {0}")]
    Export(String),

    /// An export of the same format is already running
    #[error("Export already in progress: {0}")]
    ExportBusy(String),

    /// Encryption/decryption errors
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid operation for the current state
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },
}

impl DecryptorError {
    /// Create a "not found" error for columns
    pub fn column_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Column",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Check if this is an export error (including a busy export)
    pub fn is_export(&self) -> bool {
        matches!(self, Self::Export(_) | Self::ExportBusy(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for DecryptorError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DecryptorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for DecryptorError {
    fn from(err: csv::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<calamine::Error> for DecryptorError {
    fn from(err: calamine::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for DecryptorError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<zip::result::ZipError> for DecryptorError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for decryptor operations
pub type DecryptorResult<T> = Result<T, DecryptorError>;

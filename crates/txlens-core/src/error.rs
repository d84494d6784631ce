//! Error types for txlens-core
//!
//! Errors carry an error code and convert into [`ErrorDetails`] with
//! suggestions for startup diagnostics.

use thiserror::Error;
use serde::{Deserialize, Serialize};
use std::io;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A record failed validation
    InvalidRecord,
    /// Two records share an id
    DuplicateEntry,
    /// Invalid data format
    InvalidFormat,
    /// IO error
    IoError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::InvalidRecord => write!(f, "INVALID_RECORD"),
            ErrorCode::DuplicateEntry => write!(f, "DUPLICATE_ENTRY"),
            ErrorCode::InvalidFormat => write!(f, "INVALID_FORMAT"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
        }
    }
}

/// Detailed error information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Offending record id (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            record_id: None,
            suggestions: vec![],
        }
    }

    pub fn with_record(mut self, id: String) -> Self {
        self.record_id = Some(id);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref id) = self.record_id {
            write!(f, "\nRecord: {}", id)?;
        }
        for suggestion in &self.suggestions {
            write!(f, "\n  - {}", suggestion)?;
        }
        Ok(())
    }
}

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Duplicate transaction id: {id}")]
    DuplicateId { id: String },

    #[error("Invalid data format: {message}")]
    InvalidFormat { message: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl CoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::InvalidRecord { .. } => ErrorCode::InvalidRecord,
            CoreError::DuplicateId { .. } => ErrorCode::DuplicateEntry,
            CoreError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            CoreError::Io(_) => ErrorCode::IoError,
        }
    }

    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::InvalidRecord { id, .. } => details
                .with_record(id.clone())
                .with_suggestion("Dates must use the YYYY-MM-DD format.".to_string()),
            CoreError::DuplicateId { id } => details
                .with_record(id.clone())
                .with_suggestion("Every transaction needs a unique id.".to_string()),
            CoreError::InvalidFormat { .. } => details.with_suggestion(
                "The data file must hold a JSON array of transactions.".to_string(),
            ),
            CoreError::Io(_) => details.with_suggestion(
                "Check that data.path points to a readable file.".to_string(),
            ),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::InvalidFormat { message: e.to_string() }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::InvalidRecord.to_string(), "INVALID_RECORD");
        assert_eq!(ErrorCode::DuplicateEntry.to_string(), "DUPLICATE_ENTRY");
        assert_eq!(ErrorCode::IoError.to_string(), "IO_ERROR");
    }

    #[test]
    fn test_core_error_code() {
        let error = CoreError::DuplicateId { id: "tx_001".to_string() };
        assert_eq!(error.code(), ErrorCode::DuplicateEntry);

        let error = CoreError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(error.code(), ErrorCode::IoError);
    }

    #[test]
    fn test_error_details_display() {
        let error = CoreError::DuplicateId { id: "tx_002".to_string() };
        let text = error.to_details().to_string();
        assert!(text.starts_with("[DUPLICATE_ENTRY] Duplicate transaction id: tx_002"));
        assert!(text.contains("\nRecord: tx_002"));
        assert!(text.contains("\n  - Every transaction needs a unique id."));
    }

    #[test]
    fn test_error_details_invalid_record() {
        let error = CoreError::InvalidRecord {
            id: "tx_009".to_string(),
            reason: "bad date".to_string(),
        };
        let details = error.to_details();
        assert_eq!(details.code, ErrorCode::InvalidRecord);
        assert_eq!(details.record_id.as_deref(), Some("tx_009"));
        assert!(!details.suggestions.is_empty());
        assert!(details.message.contains("bad date"));
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<Vec<u32>>("{").unwrap_err();
        let error: CoreError = err.into();
        assert_eq!(error.code(), ErrorCode::InvalidFormat);
    }
}

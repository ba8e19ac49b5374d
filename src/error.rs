//! # Centralized Error Handling
//!
//! Unified error types for the entire crate using `thiserror`.

use thiserror::Error;

/// Main error type for dynaseq operations
#[derive(Error, Debug)]
pub enum DynaseqError {
    /// I/O errors (file missing, permission denied, read/write failures)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An edit was refused and the store left unchanged (range crossing a
    /// separator, inserted content carrying a separator, source cursor
    /// outside any chromosomal region)
    #[error("rejected edit: {message}")]
    RejectedEdit { message: String },

    /// Invalid data errors (record/position length mismatch, malformed ranges)
    #[error("invalid data: {message}")]
    InvalidData { message: String },

    /// Configuration errors (chunk capacity out of range)
    #[error("configuration error: {message}")]
    Config { message: String },

    /// FASTA parse errors
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Input exceeds the configured size cap
    #[error("input is {total} bases, exceeding the limit of {limit}")]
    InputTooLarge { total: u64, limit: u64 },
}

/// Type alias for Results using DynaseqError
pub type Result<T> = std::result::Result<T, DynaseqError>;

impl DynaseqError {
    /// Create a rejected-edit error with a message
    pub fn rejected_edit(message: impl Into<String>) -> Self {
        Self::RejectedEdit {
            message: message.into(),
        }
    }

    /// Create an invalid data error
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for cortex operations
//!
//! Aggregates, the authorization rule and the command handlers all raise
//! [`CortexError`]. Errors travel to the caller unmodified; nothing in this
//! crate retries.

use thiserror::Error;
use uuid::Uuid;

/// Caller-visible category of a [`CortexError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    IllegalState,
    Unauthorized,
    Concurrency,
    EventLog,
    Serialization,
}

/// Errors that can occur while handling cortex commands
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CortexError {
    /// Malformed or semantically invalid input
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    /// Operation not valid for the aggregate's lifecycle state
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// Authorization rule rejected the acting author
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Expected version did not match the stored version
    #[error("Concurrency conflict on {aggregate_id}: expected version {expected}, found {actual}")]
    Concurrency {
        aggregate_id: Uuid,
        expected: u64,
        actual: u64,
    },

    /// Event log storage or transport failure
    #[error("Event log error: {0}")]
    EventLog(String),

    /// Envelope encoding or decoding failure
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CortexError {
    /// Build an [`CortexError::InvalidArgument`] for `field`
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        CortexError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn illegal_state(message: impl Into<String>) -> Self {
        CortexError::IllegalState(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        CortexError::Unauthorized(message.into())
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CortexError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            CortexError::IllegalState(_) => ErrorKind::IllegalState,
            CortexError::Unauthorized(_) => ErrorKind::Unauthorized,
            CortexError::Concurrency { .. } => ErrorKind::Concurrency,
            CortexError::EventLog(_) => ErrorKind::EventLog,
            CortexError::Serialization(_) => ErrorKind::Serialization,
        }
    }
}

/// Result type for cortex operations
pub type CortexResult<T> = Result<T, CortexError>;

impl From<serde_json::Error> for CortexError {
    fn from(err: serde_json::Error) -> Self {
        CortexError::Serialization(err.to_string())
    }
}

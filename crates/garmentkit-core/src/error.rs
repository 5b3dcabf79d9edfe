//! Error handling for GarmentKit
//!
//! Provides the error types shared by every layer of the application:
//! - Collaborator errors (persistence, upload, asset fetch, image generation)
//! - Unit errors (parsing unit-suffixed measurements)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Collaborator error type
///
/// Represents failures reported by the external services the engine talks
/// to: the project store, the upload service, asset sources and the image
/// generator. These are surfaced to the user as notifications and never
/// corrupt the in-memory document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollaboratorError {
    /// The requested record does not exist
    #[error("Not found: {what}")]
    NotFound {
        /// Description of the missing record.
        what: String,
    },

    /// Network or transport failure
    #[error("Network error: {reason}")]
    Network {
        /// The reason for the network failure.
        reason: String,
    },

    /// The collaborator rejected the request (validation error)
    #[error("Request rejected: {reason}")]
    Rejected {
        /// The reason the request was rejected.
        reason: String,
    },

    /// The operation was cancelled before it completed
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic collaborator error
    #[error("Collaborator error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

impl CollaboratorError {
    /// Shorthand for a network failure.
    pub fn network(reason: impl Into<String>) -> Self {
        Self::Network {
            reason: reason.into(),
        }
    }

    /// Shorthand for a missing record.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }
}

/// Unit error type
///
/// Represents failures while parsing measurement strings such as `"12.34 cm"`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// The numeric part could not be parsed
    #[error("Invalid number '{input}'")]
    InvalidNumber {
        /// The offending input.
        input: String,
    },

    /// The unit suffix is not recognised
    #[error("Unknown unit '{unit}'")]
    UnknownUnit {
        /// The unrecognised unit suffix.
        unit: String,
    },

    /// The measurement string is empty
    #[error("Empty measurement")]
    Empty,
}

/// Main error type for GarmentKit
///
/// A unified error type that can represent any error from the shared layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Collaborator error
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    /// Unit error
    #[error(transparent)]
    Unit(#[from] UnitError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a collaborator error
    pub fn is_collaborator_error(&self) -> bool {
        matches!(self, Error::Collaborator(_))
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Collaborator(CollaboratorError::Cancelled))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

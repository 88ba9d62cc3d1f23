//! Error types for the document store
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::limits::LimitError;
use thiserror::Error;

/// Result type alias for document store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the document store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Table already exists (exclusive creation)
    #[error("table already exists: {0}")]
    TableExists(String),

    /// Table not found
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// Document with the same identifier already exists
    #[error("document already exists: {0}")]
    DocumentExists(String),

    /// No document with the given identifier
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// Malformed field path, or a path that cannot be written
    /// (scalar intermediate, wildcard in a write, identifier reassignment)
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Stored value type does not match the requested or compared type
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Expected type name
        expected: &'static str,
        /// Actual type name found
        found: &'static str,
    },

    /// Document or path exceeds a structural limit
    #[error(transparent)]
    LimitExceeded(#[from] LimitError),
}

impl Error {
    /// Construct a `TypeMismatch` error from type names
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Error::TypeMismatch { expected, found }
    }
}

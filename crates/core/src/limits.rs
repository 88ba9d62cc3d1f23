//! Structural limits for documents and paths
//!
//! Limits prevent stack overflow during recursive traversal and keep
//! pathological inputs out of the store:
//!
//! | Limit | Value | Constant |
//! |-------|-------|----------|
//! | Max nesting depth | 100 levels | [`MAX_NESTING_DEPTH`] |
//! | Max path length | 256 segments | [`MAX_PATH_LENGTH`] |

use thiserror::Error;

/// Maximum nesting depth of a stored document (100 levels)
///
/// Prevents stack overflow during recursive operations like path
/// traversal and structural equality.
pub const MAX_NESTING_DEPTH: usize = 100;

/// Maximum field path length in segments (256 segments)
pub const MAX_PATH_LENGTH: usize = 256;

/// Error type for structural limit violations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LimitError {
    /// Document nesting exceeds maximum depth
    #[error("document nesting depth {depth} exceeds maximum of {max} levels")]
    NestingTooDeep {
        /// Actual nesting depth
        depth: usize,
        /// Maximum allowed depth
        max: usize,
    },

    /// Path exceeds maximum length
    #[error("path length {length} exceeds maximum of {max} segments")]
    PathTooLong {
        /// Actual path length
        length: usize,
        /// Maximum allowed length
        max: usize,
    },
}

//! Core document model for the docstore engine
//!
//! This crate defines the data model shared by every layer:
//!
//! - [`Value`]: tagged-variant value type (null, bool, int, float, string,
//!   date, array, nested object)
//! - [`FieldPath`]: dotted paths with array index and wildcard segments
//! - [`Document`]: identified, nested records with path-based access
//! - [`Error`]: the error surface for the whole workspace
//!
//! No storage or query semantics live here; those belong to
//! `docstore-engine`.

pub mod document;
pub mod error;
pub mod limits;
pub mod path;
pub mod value;

pub use document::{Document, ID_FIELD};
pub use error::{Error, Result};
pub use limits::{LimitError, MAX_NESTING_DEPTH, MAX_PATH_LENGTH};
pub use path::{FieldPath, PathSegment};
pub use value::Value;

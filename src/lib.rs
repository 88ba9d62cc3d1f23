//! docstore - embedded in-memory JSON document store
//!
//! docstore is a single-process document database: tables map string
//! identifiers to JSON-like documents, mutations apply ordered field
//! edits atomically, and predicate trees filter full-table scans.
//!
//! # Quick Start
//!
//! ```
//! use docstore::{CompareOp, Condition, Document, DocumentStore, Mutation};
//!
//! let store = DocumentStore::new();
//! let table = store.create("/apps/user_profiles");
//!
//! table.insert(
//!     Document::with_id("jdoe")
//!         .set("first_name", "John")?
//!         .set("last_name", "Doe")?,
//! )?;
//!
//! table.update("jdoe", &Mutation::new().set("active", true))?;
//!
//! let matches = table
//!     .find_where(Condition::is("last_name", CompareOp::Equal, "Doe"))
//!     .try_collect()?;
//! assert_eq!(matches.len(), 1);
//! # docstore::Result::Ok(())
//! ```
//!
//! # Architecture
//!
//! The document model lives in `docstore-core`, storage and query
//! semantics in `docstore-engine`, and record conversion in
//! `docstore-mapping`. This crate re-exports the public surface.

pub use docstore_core::{
    Document, Error, FieldPath, LimitError, PathSegment, Result, Value, ID_FIELD,
    MAX_NESTING_DEPTH, MAX_PATH_LENGTH,
};
pub use docstore_engine::{
    CompareOp, Condition, DocumentStore, DocumentStream, Mutation, MutationOp, Table,
    TabletDescriptor,
};
pub use docstore_mapping::{extract, FieldMap};

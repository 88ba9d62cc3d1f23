//! In-process document-store engine
//!
//! This crate implements the storage and query semantics over the
//! `docstore-core` document model:
//!
//! - [`DocumentStore`]: registry of tables keyed by path
//! - [`Table`]: identifier-keyed document map with per-identifier atomic
//!   updates, snapshot scans, and a flush barrier
//! - [`Mutation`]: ordered, atomic batches of field edits
//! - [`Condition`]: predicate trees with wildcard-aware array matching
//!
//! The engine is single-process and synchronous; every operation runs to
//! completion or fails. Sharding, replication, and wire protocols are out
//! of scope.

pub mod condition;
pub mod mutation;
pub mod store;
pub mod table;

pub use condition::{CompareOp, Condition};
pub use mutation::{Mutation, MutationOp};
pub use store::DocumentStore;
pub use table::{DocumentStream, Table, TabletDescriptor};

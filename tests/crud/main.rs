//! End-to-end CRUD suite against the public `docstore` surface
//!
//! Exercises the full sample dataset through the store facade: inserts,
//! queries with conditions and projections, mutations, record mapping,
//! and concurrent access.

mod common;

mod concurrency;
mod inserts;
mod queries;

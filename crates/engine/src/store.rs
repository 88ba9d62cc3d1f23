//! Document store: the table registry
//!
//! One [`DocumentStore`] owns every table in the process, keyed by path
//! string. Tables are handed out as `Arc<Table>`, so handles stay valid
//! across threads; dropping a table from the registry does not invalidate
//! handles already held (they simply stop being reachable by path).

use dashmap::DashMap;
use docstore_core::{Error, Result};
use std::sync::Arc;
use tracing::info;

use crate::table::Table;

/// Registry of tables keyed by path
#[derive(Debug, Default)]
pub struct DocumentStore {
    tables: DashMap<String, Arc<Table>>,
}

impl DocumentStore {
    /// Create an empty store
    pub fn new() -> Self {
        DocumentStore {
            tables: DashMap::new(),
        }
    }

    /// Check whether a table exists at the given path
    pub fn exists(&self, path: &str) -> bool {
        self.tables.contains_key(path)
    }

    /// Get or create the table at the given path (idempotent)
    pub fn create(&self, path: &str) -> Arc<Table> {
        let table = self
            .tables
            .entry(path.to_string())
            .or_insert_with(|| {
                info!(target: "docstore::store", table = %path, "table created");
                Arc::new(Table::new(path))
            })
            .clone();
        table
    }

    /// Create the table at the given path, failing if it already exists
    pub fn create_new(&self, path: &str) -> Result<Arc<Table>> {
        if self.exists(path) {
            return Err(Error::TableExists(path.to_string()));
        }
        Ok(self.create(path))
    }

    /// Get the table at the given path
    pub fn get(&self, path: &str) -> Result<Arc<Table>> {
        self.tables
            .get(path)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::TableNotFound(path.to_string()))
    }

    /// Drop the table at the given path; `false` when absent (idempotent)
    pub fn delete(&self, path: &str) -> bool {
        let removed = self.tables.remove(path).is_some();
        if removed {
            info!(target: "docstore::store", table = %path, "table deleted");
        }
        removed
    }

    /// Number of registered tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check whether the store has no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

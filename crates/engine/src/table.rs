//! Tables: identifier-keyed document maps
//!
//! A [`Table`] owns its documents exclusively. Documents live behind
//! `Arc` in a sharded map ([`dashmap`]), which gives per-identifier
//! atomicity: an update builds the new document off the current snapshot
//! and swaps the `Arc` under the entry lock, so concurrent readers see
//! either the fully-old or fully-new document and operations on different
//! identifiers proceed independently.
//!
//! Reads hand out clones; stored documents change only through
//! [`Table::update`].

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use docstore_core::{Document, Error, Result};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::condition::Condition;
use crate::mutation::Mutation;

/// Descriptor for one tablet (shard) of a table
///
/// This in-process engine keeps every table in a single tablet covering
/// the full key range; the surface exists for metadata parity with
/// partitioned document stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabletDescriptor {
    /// Owning table path
    pub table_path: String,
    /// Inclusive lower key bound (`None` = unbounded)
    pub start_key: Option<String>,
    /// Exclusive upper key bound (`None` = unbounded)
    pub end_key: Option<String>,
    /// Documents currently held by this tablet
    pub doc_count: usize,
}

impl fmt::Display for TabletDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.start_key.as_deref().unwrap_or("-inf");
        let end = self.end_key.as_deref().unwrap_or("+inf");
        write!(
            f,
            "tablet {{ range: [{}, {}), docs: {} }}",
            start, end, self.doc_count
        )
    }
}

/// A named table mapping document identifiers to documents
pub struct Table {
    name: String,
    path: String,
    docs: DashMap<String, Arc<Document>>,
    flush_epoch: AtomicU64,
}

impl Table {
    pub(crate) fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(&path)
            .to_string();
        Table {
            name,
            path,
            docs: DashMap::new(),
            flush_epoch: AtomicU64::new(0),
        }
    }

    /// Table name (last path component)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full table path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Check whether the table holds no documents
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Tablet (shard) metadata for this table
    pub fn tablet_infos(&self) -> Vec<TabletDescriptor> {
        vec![TabletDescriptor {
            table_path: self.path.clone(),
            start_key: None,
            end_key: None,
            doc_count: self.docs.len(),
        }]
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Insert a document, failing on identifier collision
    ///
    /// When the document has no `_id`, a fresh uuid identifier is minted.
    /// Returns the identifier under which the document was stored.
    pub fn insert(&self, doc: Document) -> Result<String> {
        doc.validate()?;
        let doc = self.ensure_id(doc)?;
        let id = doc.id().map(str::to_string).unwrap_or_default();
        match self.docs.entry(id.clone()) {
            Entry::Occupied(_) => Err(Error::DocumentExists(id)),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(doc));
                debug!(target: "docstore::table", table = %self.path, id = %id, "document inserted");
                Ok(id)
            }
        }
    }

    /// Insert a document under an explicit identifier
    ///
    /// The identifier is assigned to the document; a document already
    /// carrying a different `_id` fails with `InvalidPath` (identifiers
    /// are immutable).
    pub fn insert_with_id(&self, id: &str, mut doc: Document) -> Result<()> {
        doc.set_at(&"_id".parse()?, id.into())?;
        self.insert(doc)?;
        Ok(())
    }

    /// Insert or overwrite: never fails on an existing identifier
    pub fn insert_or_replace(&self, doc: Document) -> Result<String> {
        doc.validate()?;
        let doc = self.ensure_id(doc)?;
        let id = doc.id().map(str::to_string).unwrap_or_default();
        self.docs.insert(id.clone(), Arc::new(doc));
        debug!(target: "docstore::table", table = %self.path, id = %id, "document inserted or replaced");
        Ok(id)
    }

    /// Apply a mutation atomically to the document with the given identifier
    ///
    /// The mutation runs against a snapshot; only a fully successful
    /// result replaces the stored document. Concurrent readers see the
    /// old or the new document, never an intermediate state.
    pub fn update(&self, id: &str, mutation: &Mutation) -> Result<()> {
        let mut entry = self
            .docs
            .get_mut(id)
            .ok_or_else(|| Error::DocumentNotFound(id.to_string()))?;
        let updated = mutation.apply(entry.value())?;
        updated.validate()?;
        *entry.value_mut() = Arc::new(updated);
        debug!(target: "docstore::table", table = %self.path, id = %id, ops = mutation.ops().len(), "document updated");
        Ok(())
    }

    /// Remove a document by identifier; `false` when absent (idempotent)
    pub fn delete(&self, id: &str) -> bool {
        let removed = self.docs.remove(id).is_some();
        if removed {
            debug!(target: "docstore::table", table = %self.path, id = %id, "document deleted");
        }
        removed
    }

    /// Durability/visibility barrier
    ///
    /// Every write on this table is applied synchronously, so all
    /// mutations issued before this call are observable once it returns.
    /// The barrier is local to this process.
    pub fn flush(&self) {
        let epoch = self.flush_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(target: "docstore::table", table = %self.path, epoch, "flush barrier");
    }

    /// Release this handle
    ///
    /// Present for call-site parity with client libraries that hold
    /// server connections; the in-process table needs no teardown.
    pub fn close(&self) {
        debug!(target: "docstore::table", table = %self.path, "table handle closed");
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Fetch a copy of the document with the given identifier
    pub fn find_by_id(&self, id: &str) -> Option<Document> {
        self.docs.get(id).map(|entry| (**entry.value()).clone())
    }

    /// Fetch a projected copy (listed fields plus `_id`)
    pub fn find_by_id_projected(&self, id: &str, fields: &[&str]) -> Result<Option<Document>> {
        match self.docs.get(id) {
            None => Ok(None),
            Some(entry) => entry.value().project(fields).map(Some),
        }
    }

    /// Scan all documents
    pub fn find(&self) -> DocumentStream {
        self.stream(None, None)
    }

    /// Scan all documents, restricted to the given fields
    pub fn find_projected(&self, fields: &[&str]) -> DocumentStream {
        self.stream(None, Some(fields))
    }

    /// Scan documents matching a condition
    pub fn find_where(&self, condition: Condition) -> DocumentStream {
        self.stream(Some(condition), None)
    }

    /// Scan documents matching a condition, restricted to the given fields
    pub fn find_where_projected(&self, condition: Condition, fields: &[&str]) -> DocumentStream {
        self.stream(Some(condition), Some(fields))
    }

    /// Snapshot the table into a lazy stream
    ///
    /// Documents inserted or deleted after this point do not affect the
    /// stream. Scan order is unspecified but stable within the snapshot.
    fn stream(&self, condition: Option<Condition>, fields: Option<&[&str]>) -> DocumentStream {
        let snapshot: Vec<Arc<Document>> =
            self.docs.iter().map(|entry| entry.value().clone()).collect();
        DocumentStream {
            snapshot,
            condition,
            projection: fields.map(|fs| fs.iter().map(|f| f.to_string()).collect()),
        }
    }

    fn ensure_id(&self, doc: Document) -> Result<Document> {
        if doc.id().is_some() {
            return Ok(doc);
        }
        let minted = uuid::Uuid::new_v4().to_string();
        let mut doc = doc;
        doc.set_at(&"_id".parse()?, minted.into())?;
        Ok(doc)
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("docs", &self.docs.len())
            .finish()
    }
}

/// A restartable, lazy scan over a table snapshot
///
/// Iteration filters and projects on the fly; calling [`iter`] again
/// replays the same snapshot. Items are `Result` because predicate
/// evaluation can fail with `TypeMismatch` mid-scan.
///
/// [`iter`]: DocumentStream::iter
pub struct DocumentStream {
    snapshot: Vec<Arc<Document>>,
    condition: Option<Condition>,
    projection: Option<Vec<String>>,
}

impl DocumentStream {
    /// Iterate the snapshot, yielding matching (projected) documents
    pub fn iter(&self) -> impl Iterator<Item = Result<Document>> + '_ {
        self.snapshot.iter().filter_map(move |doc| {
            match &self.condition {
                Some(cond) => match cond.evaluate(doc) {
                    Ok(true) => {}
                    Ok(false) => return None,
                    Err(e) => return Some(Err(e)),
                },
                None => {}
            }
            Some(self.emit(doc))
        })
    }

    /// Collect every matching document, failing on the first error
    pub fn try_collect(&self) -> Result<Vec<Document>> {
        self.iter().collect()
    }

    fn emit(&self, doc: &Document) -> Result<Document> {
        match &self.projection {
            Some(fields) => {
                let refs: Vec<&str> = fields.iter().map(String::as_str).collect();
                doc.project(&refs)
            }
            None => Ok(doc.clone()),
        }
    }
}

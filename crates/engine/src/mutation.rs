//! Mutations: atomic, ordered batches of field-level edits
//!
//! A [`Mutation`] is built once with a consuming builder and applied to
//! exactly one stored document. Application is all-or-nothing: the table
//! swaps in the result only when every operation succeeded, so readers
//! never observe a partially mutated document.

use docstore_core::{Document, Error, FieldPath, Result, Value};
use serde::{Deserialize, Serialize};

/// A single field-level edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MutationOp {
    /// Write a value at a path, creating intermediate objects
    Set {
        /// Target path
        path: FieldPath,
        /// Value to write
        value: Value,
    },
    /// Extend the array at a path with values
    ///
    /// An absent target is treated as an empty array; a non-array target
    /// fails the whole mutation with `TypeMismatch`.
    Append {
        /// Target path
        path: FieldPath,
        /// Values appended in order
        values: Vec<Value>,
    },
    /// Remove the value at a path (no-op when absent)
    Delete {
        /// Target path
        path: FieldPath,
    },
}

impl MutationOp {
    fn path(&self) -> &FieldPath {
        match self {
            MutationOp::Set { path, .. } => path,
            MutationOp::Append { path, .. } => path,
            MutationOp::Delete { path } => path,
        }
    }
}

/// An ordered batch of field edits applied atomically to one document
///
/// ```
/// use docstore_engine::Mutation;
///
/// let mutation = Mutation::new()
///     .set("active", true)
///     .set("address.city", "Redwood City")
///     .delete("dob");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mutation {
    ops: Vec<MutationOp>,
}

impl Mutation {
    /// Start an empty mutation
    pub fn new() -> Self {
        Mutation { ops: Vec::new() }
    }

    /// Add a set operation
    ///
    /// # Panics
    ///
    /// Panics if the path literal is malformed. Use [`Mutation::set_at`]
    /// with a pre-parsed path for fallible call sites.
    pub fn set(self, path: &str, value: impl Into<Value>) -> Self {
        self.set_at(
            path.parse().expect("invalid path in Mutation::set"),
            value,
        )
    }

    /// Add a set operation with a pre-parsed path
    pub fn set_at(mut self, path: FieldPath, value: impl Into<Value>) -> Self {
        self.ops.push(MutationOp::Set {
            path,
            value: value.into(),
        });
        self
    }

    /// Add an append operation
    ///
    /// # Panics
    ///
    /// Panics if the path literal is malformed. Use [`Mutation::append_at`]
    /// with a pre-parsed path for fallible call sites.
    pub fn append<V: Into<Value>>(self, path: &str, values: impl IntoIterator<Item = V>) -> Self {
        self.append_at(
            path.parse().expect("invalid path in Mutation::append"),
            values,
        )
    }

    /// Add an append operation with a pre-parsed path
    pub fn append_at<V: Into<Value>>(
        mut self,
        path: FieldPath,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.ops.push(MutationOp::Append {
            path,
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Add a delete operation
    ///
    /// # Panics
    ///
    /// Panics if the path literal is malformed. Use [`Mutation::delete_at`]
    /// with a pre-parsed path for fallible call sites.
    pub fn delete(self, path: &str) -> Self {
        self.delete_at(path.parse().expect("invalid path in Mutation::delete"))
    }

    /// Add a delete operation with a pre-parsed path
    pub fn delete_at(mut self, path: FieldPath) -> Self {
        self.ops.push(MutationOp::Delete { path });
        self
    }

    /// The operations in application order
    pub fn ops(&self) -> &[MutationOp] {
        &self.ops
    }

    /// Check whether the mutation has no operations
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Apply the operations in order against a snapshot of `doc`
    ///
    /// Returns the mutated document; `doc` itself is untouched, so a
    /// failed operation leaves stored state exactly as it was. Touching
    /// the identifier field fails with [`Error::InvalidPath`].
    pub fn apply(&self, doc: &Document) -> Result<Document> {
        let mut out = doc.clone();
        for op in &self.ops {
            if op.path().is_identifier() {
                return Err(Error::InvalidPath(
                    "mutations may not touch the document identifier".into(),
                ));
            }
            match op {
                MutationOp::Set { path, value } => out.set_at(path, value.clone())?,
                MutationOp::Append { path, values } => append_at(&mut out, path, values)?,
                MutationOp::Delete { path } => {
                    out.delete_at(path);
                }
            }
        }
        Ok(out)
    }
}

/// Append to the array at `path`, seeding an empty array when absent
fn append_at(doc: &mut Document, path: &FieldPath, values: &[Value]) -> Result<()> {
    let mut array = match doc.get_at(path) {
        None => Vec::new(),
        Some(Value::Array(existing)) => existing.clone(),
        Some(other) => return Err(Error::type_mismatch("Array", other.type_name())),
    };
    array.extend(values.iter().cloned());
    doc.set_at(path, Value::Array(array))
}

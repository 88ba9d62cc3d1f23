//! Documents: identified, nested, dynamically-typed records
//!
//! A [`Document`] is an object-rooted [`Value`] with one reserved field,
//! [`ID_FIELD`] (`_id`), identifying it within a table. Field access uses
//! [`FieldPath`]s: dotted keys descend nested objects (creating them on
//! write), `[n]` addresses array elements, and `[]` fans out over array
//! elements during predicate resolution.
//!
//! ## Ownership
//!
//! The table store owns the documents it persists; callers always receive
//! clones. Mutating a clone never affects stored state — stored documents
//! change only through an applied mutation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::limits::{LimitError, MAX_NESTING_DEPTH};
use crate::path::{FieldPath, PathSegment};
use crate::value::Value;

/// Reserved identifier field name
pub const ID_FIELD: &str = "_id";

/// A JSON-like document with dotted-path field access
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Document {
    root: BTreeMap<String, Value>,
}

impl Document {
    /// Create an empty document (no identifier yet)
    pub fn new() -> Self {
        Document {
            root: BTreeMap::new(),
        }
    }

    /// Create an empty document with the given identifier
    pub fn with_id(id: impl Into<String>) -> Self {
        let mut root = BTreeMap::new();
        root.insert(ID_FIELD.to_string(), Value::String(id.into()));
        Document { root }
    }

    /// Build a document from an object value
    ///
    /// Fails with `TypeMismatch` if the value is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Document { root }),
            other => Err(Error::type_mismatch("Object", other.type_name())),
        }
    }

    /// Consume the document, yielding its object value
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// The document identifier, if assigned
    pub fn id(&self) -> Option<&str> {
        self.root.get(ID_FIELD).and_then(Value::as_str)
    }

    /// Number of top-level fields (including `_id`)
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Check whether the document has no fields
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Iterate the top-level fields in stable (sorted) order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.root.iter().map(|(k, v)| (k.as_str(), v))
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Set a value at a dotted path, chaining style
    ///
    /// Intermediate objects are created as needed. Fails with
    /// [`Error::InvalidPath`] when the path is malformed, contains a
    /// wildcard, crosses a scalar, or reassigns `_id`.
    ///
    /// ```
    /// use docstore_core::Document;
    ///
    /// let doc = Document::new()
    ///     .set("_id", "jdoe")?
    ///     .set("first_name", "John")?
    ///     .set("address.city", "San Jose")?;
    /// assert_eq!(doc.id(), Some("jdoe"));
    /// # docstore_core::Result::Ok(())
    /// ```
    pub fn set(mut self, path: &str, value: impl Into<Value>) -> Result<Self> {
        self.set_at(&path.parse()?, value.into())?;
        Ok(self)
    }

    /// Set a value at a pre-parsed path (mutating)
    pub fn set_at(&mut self, path: &FieldPath, value: Value) -> Result<()> {
        if path.is_empty() {
            return Err(Error::InvalidPath("cannot set the document root".into()));
        }
        if !path.is_concrete() {
            return Err(Error::InvalidPath(format!(
                "wildcard not allowed in write path: {}",
                path
            )));
        }
        if path.is_identifier() {
            return self.assign_id(path, value);
        }

        let mut container = Value::Object(std::mem::take(&mut self.root));
        let result = set_in(&mut container, path.segments(), value, path);
        match container {
            Value::Object(root) => self.root = root,
            // set_in never changes the root container type
            _ => unreachable!("document root must remain an object"),
        }
        result
    }

    /// Identifier writes: string-typed, single segment, write-once
    fn assign_id(&mut self, path: &FieldPath, value: Value) -> Result<()> {
        if path.len() != 1 {
            return Err(Error::InvalidPath(format!(
                "cannot address into the identifier field: {}",
                path
            )));
        }
        let id = match value {
            Value::String(s) => s,
            other => return Err(Error::type_mismatch("String", other.type_name())),
        };
        match self.id() {
            Some(existing) if existing != id => Err(Error::InvalidPath(
                "document identifier is immutable once assigned".into(),
            )),
            _ => {
                self.root.insert(ID_FIELD.to_string(), Value::String(id));
                Ok(())
            }
        }
    }

    /// Remove the value at a concrete path
    ///
    /// Returns `true` if a value was removed; absent paths are a no-op.
    /// Wildcard paths never match.
    pub fn delete_at(&mut self, path: &FieldPath) -> bool {
        let mut container = Value::Object(std::mem::take(&mut self.root));
        let removed = delete_in(&mut container, path.segments());
        match container {
            Value::Object(root) => self.root = root,
            _ => unreachable!("document root must remain an object"),
        }
        removed
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Resolve a concrete dotted path to its value
    ///
    /// Returns `None` when the path is unresolved or contains a wildcard.
    pub fn get_at(&self, path: &FieldPath) -> Option<&Value> {
        let mut segments = path.segments().iter();
        let first = match segments.next()? {
            PathSegment::Field(k) => self.root.get(k)?,
            _ => return None,
        };
        let mut current = first;
        for segment in segments {
            current = match (segment, current) {
                (PathSegment::Field(k), Value::Object(obj)) => obj.get(k)?,
                (PathSegment::Index(i), Value::Array(arr)) => arr.get(*i)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Resolve a dotted path given as a string
    pub fn get(&self, path: &str) -> Result<Option<&Value>> {
        Ok(self.get_at(&path.parse()?))
    }

    /// Typed getter: string field
    pub fn get_string(&self, path: &str) -> Result<Option<&str>> {
        self.get_typed(path, "String", Value::as_str)
    }

    /// Typed getter: integer field
    pub fn get_int(&self, path: &str) -> Result<Option<i64>> {
        self.get_typed(path, "Int", Value::as_int)
    }

    /// Typed getter: float field
    pub fn get_float(&self, path: &str) -> Result<Option<f64>> {
        self.get_typed(path, "Float", Value::as_float)
    }

    /// Typed getter: boolean field
    pub fn get_bool(&self, path: &str) -> Result<Option<bool>> {
        self.get_typed(path, "Bool", Value::as_bool)
    }

    /// Typed getter: date field
    pub fn get_date(&self, path: &str) -> Result<Option<chrono::NaiveDate>> {
        self.get_typed(path, "Date", Value::as_date)
    }

    /// Typed getter: array field
    pub fn get_array(&self, path: &str) -> Result<Option<&[Value]>> {
        self.get_typed(path, "Array", Value::as_array)
    }

    /// Typed getter: nested document field
    pub fn get_document(&self, path: &str) -> Result<Option<Document>> {
        match self.get(path)? {
            None => Ok(None),
            Some(Value::Object(obj)) => Ok(Some(Document { root: obj.clone() })),
            Some(other) => Err(Error::type_mismatch("Object", other.type_name())),
        }
    }

    fn get_typed<'a, T>(
        &'a self,
        path: &str,
        expected: &'static str,
        extract: impl Fn(&'a Value) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.get(path)? {
            None => Ok(None),
            Some(v) => extract(v)
                .map(Some)
                .ok_or_else(|| Error::type_mismatch(expected, v.type_name())),
        }
    }

    /// Resolve a path to zero or more values, honoring wildcards
    ///
    /// A wildcard segment fans out over every element of an array;
    /// concrete segments resolve to at most one value. Used by the
    /// condition engine's existential array semantics.
    pub fn resolve<'a>(&'a self, path: &FieldPath) -> Vec<&'a Value> {
        let mut out = Vec::new();
        if let Some(PathSegment::Field(k)) = path.segments().first() {
            if let Some(v) = self.root.get(k) {
                resolve_into(v, &path.segments()[1..], &mut out);
            }
        }
        out
    }

    // ========================================================================
    // Projection and validation
    // ========================================================================

    /// Copy of this document restricted to the given field paths
    ///
    /// The identifier is always carried over. Fields absent from the
    /// document are skipped.
    pub fn project(&self, fields: &[&str]) -> Result<Document> {
        let mut out = match self.id() {
            Some(id) => Document::with_id(id),
            None => Document::new(),
        };
        for field in fields {
            let path: FieldPath = field.parse()?;
            if let Some(value) = self.get_at(&path) {
                out.set_at(&path, value.clone())?;
            }
        }
        Ok(out)
    }

    /// Enforce structural limits (nesting depth)
    pub fn validate(&self) -> Result<()> {
        let depth = Value::Object(self.root.clone()).nesting_depth();
        if depth > MAX_NESTING_DEPTH {
            return Err(LimitError::NestingTooDeep {
                depth,
                max: MAX_NESTING_DEPTH,
            }
            .into());
        }
        Ok(())
    }
}

impl fmt::Display for Document {
    /// Compact deterministic JSON rendering (sorted keys)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.root.clone()))
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        doc.into_value()
    }
}

// ============================================================================
// Path traversal helpers
// ============================================================================

fn set_in(
    container: &mut Value,
    segments: &[PathSegment],
    value: Value,
    full_path: &FieldPath,
) -> Result<()> {
    let (segment, rest) = match segments.split_first() {
        Some(split) => split,
        None => {
            *container = value;
            return Ok(());
        }
    };

    match (segment, container) {
        (PathSegment::Field(key), Value::Object(obj)) => {
            let child = obj
                .entry(key.clone())
                .or_insert_with(|| empty_container_for(rest.first()));
            set_in(child, rest, value, full_path)
        }
        (PathSegment::Index(idx), Value::Array(arr)) => {
            if *idx < arr.len() {
                set_in(&mut arr[*idx], rest, value, full_path)
            } else if *idx == arr.len() && rest.is_empty() {
                arr.push(value);
                Ok(())
            } else {
                Err(Error::InvalidPath(format!(
                    "array index {} out of bounds in path {}",
                    idx, full_path
                )))
            }
        }
        (_, other) => Err(Error::InvalidPath(format!(
            "segment {} of path {} addresses into a {}",
            segment, full_path, other.type_name()
        ))),
    }
}

/// New intermediate container for a missing segment: arrays before an
/// index segment, objects otherwise.
fn empty_container_for(next: Option<&PathSegment>) -> Value {
    match next {
        Some(PathSegment::Index(_)) => Value::array(),
        _ => Value::object(),
    }
}

fn delete_in(container: &mut Value, segments: &[PathSegment]) -> bool {
    let (segment, rest) = match segments.split_first() {
        Some(split) => split,
        None => return false,
    };

    if rest.is_empty() {
        return match (segment, container) {
            (PathSegment::Field(key), Value::Object(obj)) => obj.remove(key).is_some(),
            (PathSegment::Index(idx), Value::Array(arr)) => {
                if *idx < arr.len() {
                    arr.remove(*idx);
                    true
                } else {
                    false
                }
            }
            _ => false,
        };
    }

    match (segment, container) {
        (PathSegment::Field(key), Value::Object(obj)) => match obj.get_mut(key) {
            Some(child) => delete_in(child, rest),
            None => false,
        },
        (PathSegment::Index(idx), Value::Array(arr)) => match arr.get_mut(*idx) {
            Some(child) => delete_in(child, rest),
            None => false,
        },
        _ => false,
    }
}

fn resolve_into<'a>(value: &'a Value, segments: &[PathSegment], out: &mut Vec<&'a Value>) {
    let (segment, rest) = match segments.split_first() {
        Some(split) => split,
        None => {
            out.push(value);
            return;
        }
    };

    match (segment, value) {
        (PathSegment::Field(key), Value::Object(obj)) => {
            if let Some(child) = obj.get(key) {
                resolve_into(child, rest, out);
            }
        }
        (PathSegment::Index(idx), Value::Array(arr)) => {
            if let Some(child) = arr.get(*idx) {
                resolve_into(child, rest, out);
            }
        }
        (PathSegment::Wildcard, Value::Array(arr)) => {
            for child in arr {
                resolve_into(child, rest, out);
            }
        }
        _ => {}
    }
}

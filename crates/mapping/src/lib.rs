//! Bean mapping: documents to and from typed records
//!
//! A [`FieldMap`] is an explicit, statically declared mapping table built
//! at initialization: each entry binds one document field path to a pair
//! of accessors on the record type. No runtime reflection is involved —
//! the table itself is the declaration.
//!
//! ```
//! use docstore_mapping::{extract, FieldMap};
//! use docstore_core::Value;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct User {
//!     id: String,
//!     first_name: String,
//! }
//!
//! let map = FieldMap::<User>::new()
//!     .field(
//!         "_id",
//!         |u| Some(Value::from(u.id.as_str())),
//!         |u, v| Ok(u.id = extract::string(v)?),
//!     )
//!     .field(
//!         "first_name",
//!         |u| Some(Value::from(u.first_name.as_str())),
//!         |u, v| Ok(u.first_name = extract::string(v)?),
//!     );
//!
//! let user = User { id: "jdoe".into(), first_name: "John".into() };
//! let doc = map.to_document(&user).unwrap();
//! assert_eq!(map.from_document(&doc).unwrap(), user);
//! ```
//!
//! Converting a document into a record ignores document fields the table
//! does not mention, and leaves record fields missing from the document
//! at their `Default` value. The conversion is symmetric: round-tripping
//! a record reproduces every mapped field exactly.

use docstore_core::{Document, FieldPath, Result, Value};

/// Record-to-value accessor; `None` skips the field on serialization
pub type ReadFn<T> = fn(&T) -> Option<Value>;

/// Value-to-record accessor; fails with `TypeMismatch` on a wrong type
pub type WriteFn<T> = fn(&mut T, &Value) -> Result<()>;

struct MappedField<T> {
    path: FieldPath,
    read: ReadFn<T>,
    write: WriteFn<T>,
}

/// Statically declared, bidirectional field-mapping table
pub struct FieldMap<T> {
    fields: Vec<MappedField<T>>,
}

impl<T> Default for FieldMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FieldMap<T> {
    /// Start an empty mapping table
    pub fn new() -> Self {
        FieldMap { fields: Vec::new() }
    }

    /// Bind a document field path to a record accessor pair
    ///
    /// # Panics
    ///
    /// Panics if the path literal is malformed. Use [`FieldMap::field_at`]
    /// with a pre-parsed path for fallible call sites.
    pub fn field(self, path: &str, read: ReadFn<T>, write: WriteFn<T>) -> Self {
        self.field_at(
            path.parse().expect("invalid path in FieldMap::field"),
            read,
            write,
        )
    }

    /// Bind a pre-parsed document field path to a record accessor pair
    pub fn field_at(mut self, path: FieldPath, read: ReadFn<T>, write: WriteFn<T>) -> Self {
        self.fields.push(MappedField { path, read, write });
        self
    }

    /// Convert a record into a document
    ///
    /// Fields whose read accessor yields `None` are omitted.
    pub fn to_document(&self, record: &T) -> Result<Document> {
        let mut doc = Document::new();
        for field in &self.fields {
            if let Some(value) = (field.read)(record) {
                doc.set_at(&field.path, value)?;
            }
        }
        Ok(doc)
    }
}

impl<T: Default> FieldMap<T> {
    /// Convert a document into a record
    ///
    /// Unknown document fields are ignored; mapped fields absent from the
    /// document keep the record's default value. A mapped field present
    /// with the wrong type fails with `TypeMismatch`.
    pub fn from_document(&self, doc: &Document) -> Result<T> {
        let mut record = T::default();
        for field in &self.fields {
            if let Some(value) = doc.get_at(&field.path) {
                (field.write)(&mut record, value)?;
            }
        }
        Ok(record)
    }
}

/// Typed extractors for write-accessor bodies
pub mod extract {
    use chrono::NaiveDate;
    use docstore_core::{Error, Result, Value};

    /// Extract an owned string
    pub fn string(v: &Value) -> Result<String> {
        v.as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::type_mismatch("String", v.type_name()))
    }

    /// Extract an integer
    pub fn int(v: &Value) -> Result<i64> {
        v.as_int()
            .ok_or_else(|| Error::type_mismatch("Int", v.type_name()))
    }

    /// Extract a float
    pub fn float(v: &Value) -> Result<f64> {
        v.as_float()
            .ok_or_else(|| Error::type_mismatch("Float", v.type_name()))
    }

    /// Extract a boolean
    pub fn bool(v: &Value) -> Result<bool> {
        v.as_bool()
            .ok_or_else(|| Error::type_mismatch("Bool", v.type_name()))
    }

    /// Extract a date
    pub fn date(v: &Value) -> Result<NaiveDate> {
        v.as_date()
            .ok_or_else(|| Error::type_mismatch("Date", v.type_name()))
    }

    /// Extract an array of strings
    pub fn string_array(v: &Value) -> Result<Vec<String>> {
        let arr = v
            .as_array()
            .ok_or_else(|| Error::type_mismatch("Array", v.type_name()))?;
        arr.iter().map(string).collect()
    }
}

//! Field paths into documents
//!
//! A [`FieldPath`] addresses a location inside a document using dotted
//! keys, array indexes, and array wildcards:
//!
//! | Syntax | Meaning | Example |
//! |--------|---------|---------|
//! | `key` | Object field | `first_name` |
//! | `key1.key2` | Nested field | `address.city` |
//! | `key[n]` | Array element | `interests[0]` |
//! | `key[]` | Any array element (predicates only) | `interests[]` |
//!
//! Wildcard segments are only meaningful for predicate matching; writes
//! require a concrete path (see [`FieldPath::is_concrete`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::limits::{LimitError, MAX_PATH_LENGTH};

/// A segment in a field path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    /// Object field: `.foo`
    Field(String),
    /// Array index: `[0]`
    Index(usize),
    /// Array wildcard: `[]` — matches every element
    Wildcard,
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(k) => write!(f, ".{}", k),
            PathSegment::Index(i) => write!(f, "[{}]", i),
            PathSegment::Wildcard => write!(f, "[]"),
        }
    }
}

/// A parsed path into a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Create a path from a vector of segments
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        FieldPath { segments }
    }

    /// Parse a path, surfacing [`Error::InvalidPath`] on malformed input
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    /// Get the path segments
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Get the number of segments in the path
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the path is empty (addresses the document root)
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Check that the path contains no wildcard segments
    ///
    /// Only concrete paths can be written to; wildcards exist for
    /// predicate matching.
    pub fn is_concrete(&self) -> bool {
        !self
            .segments
            .iter()
            .any(|s| matches!(s, PathSegment::Wildcard))
    }

    /// Append a field segment (builder pattern)
    pub fn field(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Field(key.into()));
        self
    }

    /// Append an index segment (builder pattern)
    pub fn index(mut self, idx: usize) -> Self {
        self.segments.push(PathSegment::Index(idx));
        self
    }

    /// Check if this path addresses the document identifier field
    pub fn is_identifier(&self) -> bool {
        matches!(
            self.segments.first(),
            Some(PathSegment::Field(k)) if k == crate::document::ID_FIELD
        )
    }

    /// Validate path length limit
    pub fn validate(&self) -> std::result::Result<(), LimitError> {
        let length = self.segments.len();
        if length > MAX_PATH_LENGTH {
            Err(LimitError::PathTooLong {
                length,
                max: MAX_PATH_LENGTH,
            })
        } else {
            Ok(())
        }
    }
}

impl FromStr for FieldPath {
    type Err = Error;

    /// Parse a path from a string
    ///
    /// Supported syntax:
    /// - `foo` - object field
    /// - `foo.bar` - nested fields
    /// - `foo[0]` - field then index
    /// - `foo[]` - field then wildcard
    /// - `foo[0].bar` - mixed
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidPath("empty path".to_string()));
        }

        let mut segments = Vec::new();
        let chars: Vec<char> = s.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            if chars[i] == '.' {
                // Start of a field segment
                i += 1;
                if i >= chars.len() {
                    return Err(Error::InvalidPath(format!("empty key at position {}", i)));
                }
            }

            if chars[i] == '[' {
                // Array index or wildcard segment
                let start = i;
                i += 1;
                let idx_start = i;

                // Find closing bracket
                while i < chars.len() && chars[i] != ']' {
                    i += 1;
                }

                if i >= chars.len() {
                    return Err(Error::InvalidPath(format!(
                        "unclosed bracket starting at position {}",
                        start
                    )));
                }

                if idx_start == i {
                    segments.push(PathSegment::Wildcard);
                } else {
                    let idx_str: String = chars[idx_start..i].iter().collect();
                    let idx = idx_str.parse::<usize>().map_err(|_| {
                        Error::InvalidPath(format!(
                            "invalid array index at position {}: {}",
                            idx_start, idx_str
                        ))
                    })?;
                    segments.push(PathSegment::Index(idx));
                }
                i += 1; // Skip closing bracket
            } else if chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '-' {
                // Field segment
                let key_start = i;
                while i < chars.len()
                    && (chars[i].is_alphanumeric() || chars[i] == '_' || chars[i] == '-')
                {
                    i += 1;
                }
                let key: String = chars[key_start..i].iter().collect();
                segments.push(PathSegment::Field(key));
            } else {
                return Err(Error::InvalidPath(format!(
                    "unexpected character '{}' at position {}",
                    chars[i], i
                )));
            }
        }

        let path = FieldPath { segments };
        path.validate()?;
        Ok(path)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for seg in &self.segments {
            match seg {
                PathSegment::Field(k) => {
                    if !first {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", k)?;
                }
                PathSegment::Index(i) => write!(f, "[{}]", i)?,
                PathSegment::Wildcard => write!(f, "[]")?,
            }
            first = false;
        }
        Ok(())
    }
}

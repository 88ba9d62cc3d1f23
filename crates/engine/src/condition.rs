//! Conditions: predicate trees evaluated against documents
//!
//! A [`Condition`] is a tree of leaf comparisons combined by AND/OR group
//! nodes, built by explicit tree construction:
//!
//! ```
//! use docstore_engine::{CompareOp, Condition};
//!
//! let in_1980 = Condition::and([
//!     Condition::is("dob", CompareOp::GreaterOrEqual, "1980-01-01".parse::<chrono::NaiveDate>().unwrap()),
//!     Condition::is("dob", CompareOp::Less, "1981-01-01".parse::<chrono::NaiveDate>().unwrap()),
//! ]);
//! ```
//!
//! Leaf evaluation resolves the field path wildcard-aware: a wildcard path
//! like `interests[]` satisfies the leaf when ANY resolved element matches
//! (existential semantics), an indexed path like `interests[0]` compares
//! exactly the addressed element, and an absent field never satisfies any
//! operator.

use docstore_core::{Document, FieldPath, Result, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Comparison operator for condition leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompareOp {
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompareOp::Equal => "==",
            CompareOp::NotEqual => "!=",
            CompareOp::Less => "<",
            CompareOp::LessOrEqual => "<=",
            CompareOp::Greater => ">",
            CompareOp::GreaterOrEqual => ">=",
        };
        write!(f, "{}", s)
    }
}

/// A predicate tree over documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// Leaf comparison: `field OP value`
    Is {
        /// Field path, possibly with wildcard or index segments
        path: FieldPath,
        /// Comparison operator
        op: CompareOp,
        /// Comparison target
        value: Value,
    },
    /// All children must hold (true when empty)
    And(Vec<Condition>),
    /// At least one child must hold (false when empty)
    Or(Vec<Condition>),
}

impl Condition {
    /// Build a leaf comparison
    ///
    /// # Panics
    ///
    /// Panics if the path literal is malformed. Use [`Condition::is_at`]
    /// with a pre-parsed path for fallible call sites.
    pub fn is(path: &str, op: CompareOp, value: impl Into<Value>) -> Self {
        Condition::is_at(path.parse().expect("invalid path in Condition::is"), op, value)
    }

    /// Build a leaf comparison with a pre-parsed path
    pub fn is_at(path: FieldPath, op: CompareOp, value: impl Into<Value>) -> Self {
        Condition::Is {
            path,
            op,
            value: value.into(),
        }
    }

    /// Group children under AND
    pub fn and(children: impl IntoIterator<Item = Condition>) -> Self {
        Condition::And(children.into_iter().collect())
    }

    /// Group children under OR
    pub fn or(children: impl IntoIterator<Item = Condition>) -> Self {
        Condition::Or(children.into_iter().collect())
    }

    /// Evaluate the predicate tree against one document
    ///
    /// Group nodes short-circuit. Comparing values of incompatible types
    /// surfaces `TypeMismatch`; an absent field is simply `false`.
    pub fn evaluate(&self, doc: &Document) -> Result<bool> {
        match self {
            Condition::Is { path, op, value } => {
                for candidate in doc.resolve(path) {
                    if satisfies(candidate, *op, value)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Condition::And(children) => {
                for child in children {
                    if !child.evaluate(doc)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Condition::Or(children) => {
                for child in children {
                    if child.evaluate(doc)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

/// Compare one resolved value against the leaf's target
///
/// Equality on arrays and nested objects is structural; every other
/// comparison routes through [`Value::compare`]'s natural ordering.
fn satisfies(candidate: &Value, op: CompareOp, target: &Value) -> Result<bool> {
    let both_containers = (candidate.is_array() && target.is_array())
        || (candidate.is_object() && target.is_object());
    if both_containers {
        return match op {
            CompareOp::Equal => Ok(candidate == target),
            CompareOp::NotEqual => Ok(candidate != target),
            _ => Err(docstore_core::Error::type_mismatch(
                candidate.type_name(),
                target.type_name(),
            )),
        };
    }
    let ordering = candidate.compare(target)?;
    Ok(match op {
        CompareOp::Equal => ordering == Ordering::Equal,
        CompareOp::NotEqual => ordering != Ordering::Equal,
        CompareOp::Less => ordering == Ordering::Less,
        CompareOp::LessOrEqual => ordering != Ordering::Greater,
        CompareOp::Greater => ordering == Ordering::Greater,
        CompareOp::GreaterOrEqual => ordering != Ordering::Less,
    })
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Is { path, op, value } => write!(f, "({} {} {})", path, op, value),
            Condition::And(children) => write_group(f, "AND", children),
            Condition::Or(children) => write_group(f, "OR", children),
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, sep: &str, children: &[Condition]) -> fmt::Result {
    write!(f, "(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", sep)?;
        }
        write!(f, "{}", child)?;
    }
    write!(f, ")")
}

//! Shared fixtures for the CRUD suite
//!
//! Import via `use crate::common::*;` from any sibling module.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Arc;

pub use chrono::NaiveDate;
pub use docstore::{
    extract, CompareOp, Condition, Document, DocumentStore, DocumentStream, Error, FieldMap,
    Mutation, Table, Value,
};

pub const TABLE_PATH: &str = "/apps/user_profiles";

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// The five-user sample dataset used throughout the suite
pub fn seeded_store() -> (DocumentStore, Arc<Table>) {
    let store = DocumentStore::new();
    let table = store.create(TABLE_PATH);

    table
        .insert(
            Document::with_id("jdoe")
                .set("first_name", "John")
                .unwrap()
                .set("last_name", "Doe")
                .unwrap()
                .set("dob", date("1970-06-23"))
                .unwrap(),
        )
        .unwrap();

    table
        .insert_with_id(
            "dsimon",
            Document::new()
                .set("first_name", "David")
                .unwrap()
                .set("last_name", "Simon")
                .unwrap()
                .set("dob", date("1980-10-13"))
                .unwrap(),
        )
        .unwrap();

    table
        .insert(
            Document::with_id("alehmann")
                .set("first_name", "Andrew")
                .unwrap()
                .set("last_name", "Lehmann")
                .unwrap()
                .set("dob", date("1980-10-13"))
                .unwrap()
                .set("interests", vec!["html", "css", "js"])
                .unwrap(),
        )
        .unwrap();

    table
        .insert(
            Document::with_id("mdupont")
                .set("first_name", "Maxime")
                .unwrap()
                .set("last_name", "Dupont")
                .unwrap()
                .set("dob", date("1982-02-03"))
                .unwrap()
                .set("interests", vec!["sports", "movies", "electronics"])
                .unwrap()
                .set("address.line", "1223 Broadway")
                .unwrap()
                .set("address.city", "San Jose")
                .unwrap()
                .set("address.zip", 95109)
                .unwrap(),
        )
        .unwrap();

    table
        .insert(
            Document::with_id("rsmith")
                .set("first_name", "Robert")
                .unwrap()
                .set("last_name", "Smith")
                .unwrap()
                .set("dob", date("1982-02-03"))
                .unwrap()
                .set("interests", vec!["electronics", "music", "sports"])
                .unwrap()
                .set(
                    "address",
                    Document::new()
                        .set("line", "100 Main Street")
                        .unwrap()
                        .set("city", "San Francisco")
                        .unwrap()
                        .set("zip", 94105)
                        .unwrap()
                        .into_value(),
                )
                .unwrap(),
        )
        .unwrap();

    (store, table)
}

/// Collect the matched identifiers of a stream, order-insensitive
pub fn ids(stream: &DocumentStream) -> BTreeSet<String> {
    stream
        .try_collect()
        .unwrap()
        .iter()
        .map(|d| d.id().unwrap().to_string())
        .collect()
}

pub fn id_set<const N: usize>(names: [&str; N]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

//! Insert paths: explicit ids, minted ids, replacement, and conflicts

use crate::common::*;

#[test]
fn seeded_dataset_is_complete() {
    let (_store, table) = seeded_store();
    assert_eq!(table.len(), 5);
    assert_eq!(
        ids(&table.find()),
        id_set(["jdoe", "dsimon", "alehmann", "mdupont", "rsmith"])
    );
}

#[test]
fn insert_duplicate_id_is_a_recoverable_conflict() {
    let (_store, table) = seeded_store();
    let err = table
        .insert(Document::with_id("jdoe").set("first_name", "Impostor").unwrap())
        .unwrap_err();
    assert!(matches!(err, Error::DocumentExists(id) if id == "jdoe"));

    // the table is fully usable afterwards and the original is intact
    let doc = table.find_by_id("jdoe").unwrap();
    assert_eq!(doc.get_string("first_name").unwrap(), Some("John"));
    table
        .insert(Document::with_id("fresh").set("a", 1).unwrap())
        .unwrap();
    assert_eq!(table.len(), 6);
}

#[test]
fn insert_without_id_mints_one() {
    let (_store, table) = seeded_store();
    let id = table
        .insert(Document::new().set("first_name", "Anon").unwrap())
        .unwrap();
    assert!(!id.is_empty());
    let stored = table.find_by_id(&id).unwrap();
    assert_eq!(stored.id(), Some(id.as_str()));
    // distinct inserts mint distinct identifiers
    let other = table
        .insert(Document::new().set("first_name", "Anon").unwrap())
        .unwrap();
    assert_ne!(id, other);
}

#[test]
fn insert_with_id_rejects_conflicting_preassigned_id() {
    let (_store, table) = seeded_store();
    let doc = Document::with_id("someone").set("a", 1).unwrap();
    assert!(matches!(
        table.insert_with_id("other", doc),
        Err(Error::InvalidPath(_))
    ));
}

#[test]
fn insert_or_replace_swaps_the_whole_document() {
    let (_store, table) = seeded_store();
    table
        .insert_or_replace(Document::with_id("jdoe").set("first_name", "Johnny").unwrap())
        .unwrap();
    let stored = table.find_by_id("jdoe").unwrap();
    assert_eq!(stored.get_string("first_name").unwrap(), Some("Johnny"));
    // replaced wholesale, not merged
    assert_eq!(stored.get("last_name").unwrap(), None);
    assert_eq!(table.len(), 5);
}

#[test]
fn dotted_paths_and_nested_documents_build_the_same_shape() {
    let (_store, table) = seeded_store();
    // mdupont's address was written with dotted paths, rsmith's as a
    // nested document value; both read back the same way
    let mdupont = table.find_by_id("mdupont").unwrap();
    let rsmith = table.find_by_id("rsmith").unwrap();
    assert_eq!(
        mdupont.get_string("address.city").unwrap(),
        Some("San Jose")
    );
    assert_eq!(
        rsmith.get_string("address.city").unwrap(),
        Some("San Francisco")
    );
    assert!(mdupont.get("address").unwrap().unwrap().is_object());
    assert!(rsmith.get("address").unwrap().unwrap().is_object());
}

#[test]
fn oversized_nesting_is_rejected_at_insert() {
    let (_store, table) = seeded_store();
    let mut value = Value::from(1i64);
    for _ in 0..docstore::MAX_NESTING_DEPTH + 1 {
        value = Value::Array(vec![value]);
    }
    let mut doc = Document::with_id("deep");
    doc.set_at(&"payload".parse().unwrap(), value).unwrap();
    assert!(matches!(
        table.insert(doc),
        Err(Error::LimitExceeded(_))
    ));
}

#[test]
fn delete_then_reinsert() {
    let (_store, table) = seeded_store();
    assert!(table.delete("jdoe"));
    assert!(!table.delete("jdoe"));
    assert!(table.find_by_id("jdoe").is_none());
    table
        .insert(Document::with_id("jdoe").set("first_name", "Jane").unwrap())
        .unwrap();
    assert_eq!(
        table.find_by_id("jdoe").unwrap().get_string("first_name").unwrap(),
        Some("Jane")
    );
}

#[test]
fn store_level_table_lifecycle() {
    let (store, table) = seeded_store();
    assert!(store.exists(TABLE_PATH));
    assert!(store.delete(TABLE_PATH));
    assert!(!store.exists(TABLE_PATH));
    // held handles keep working on the detached table
    assert_eq!(table.len(), 5);
    // a recreated table starts empty
    assert!(store.create(TABLE_PATH).is_empty());
}

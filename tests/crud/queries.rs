//! Query paths: point lookups, scans, conditions, and projections

use crate::common::*;

#[test]
fn find_by_id_returns_a_copy() {
    let (_store, table) = seeded_store();
    let doc = table.find_by_id("mdupont").unwrap();
    assert_eq!(doc.id(), Some("mdupont"));
    assert_eq!(doc.get_string("first_name").unwrap(), Some("Maxime"));
    assert!(table.find_by_id("ghost").is_none());
}

#[test]
fn projection_always_carries_the_identifier() {
    let (_store, table) = seeded_store();
    let doc = table
        .find_by_id_projected("mdupont", &["last_name"])
        .unwrap()
        .unwrap();
    assert_eq!(doc.id(), Some("mdupont"));
    assert_eq!(doc.get_string("last_name").unwrap(), Some("Dupont"));
    assert_eq!(doc.get("first_name").unwrap(), None);
    assert_eq!(doc.get("address").unwrap(), None);
}

#[test]
fn projection_can_reach_into_subdocuments() {
    let (_store, table) = seeded_store();
    let doc = table
        .find_by_id_projected("mdupont", &["address.city"])
        .unwrap()
        .unwrap();
    assert_eq!(doc.get_string("address.city").unwrap(), Some("San Jose"));
    assert_eq!(doc.get("address.zip").unwrap(), None);
}

#[test]
fn full_scan_yields_every_document() {
    let (_store, table) = seeded_store();
    assert_eq!(table.find().try_collect().unwrap().len(), 5);
}

#[test]
fn equality_on_string_field() {
    let (_store, table) = seeded_store();
    let stream = table.find_where(Condition::is("last_name", CompareOp::Equal, "Doe"));
    assert_eq!(ids(&stream), id_set(["jdoe"]));
}

#[test]
fn date_range_with_and_group() {
    let (_store, table) = seeded_store();
    let born_in_1980 = Condition::and([
        Condition::is("dob", CompareOp::GreaterOrEqual, date("1980-01-01")),
        Condition::is("dob", CompareOp::Less, date("1981-01-01")),
    ]);
    let stream = table.find_where(born_in_1980);
    assert_eq!(ids(&stream), id_set(["dsimon", "alehmann"]));
}

#[test]
fn subdocument_field_condition() {
    let (_store, table) = seeded_store();
    let stream = table.find_where(Condition::is("address.zip", CompareOp::Equal, 95109));
    assert_eq!(ids(&stream), id_set(["mdupont"]));
}

#[test]
fn wildcard_matches_any_array_element() {
    let (_store, table) = seeded_store();
    let stream = table.find_where(Condition::is("interests[]", CompareOp::Equal, "sports"));
    assert_eq!(ids(&stream), id_set(["mdupont", "rsmith"]));
}

#[test]
fn indexed_array_access_is_positional() {
    let (_store, table) = seeded_store();
    let stream = table.find_where(Condition::is("interests[0]", CompareOp::Equal, "sports"));
    // rsmith has "sports" at position 2, not 0
    assert_eq!(ids(&stream), id_set(["mdupont"]));
}

#[test]
fn or_group_unions_matches() {
    let (_store, table) = seeded_store();
    let stream = table.find_where(Condition::or([
        Condition::is("last_name", CompareOp::Equal, "Doe"),
        Condition::is("address.zip", CompareOp::Equal, 94105),
    ]));
    assert_eq!(ids(&stream), id_set(["jdoe", "rsmith"]));
}

#[test]
fn absent_field_never_matches() {
    let (_store, table) = seeded_store();
    // only three of the five documents have interests at all
    let stream = table.find_where(Condition::is("interests[]", CompareOp::NotEqual, "nothing"));
    assert_eq!(ids(&stream), id_set(["alehmann", "mdupont", "rsmith"]));
}

#[test]
fn condition_with_projection() {
    let (_store, table) = seeded_store();
    let docs = table
        .find_where_projected(
            Condition::is("interests[0]", CompareOp::Equal, "sports"),
            &["first_name", "last_name", "interests"],
        )
        .try_collect()
        .unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id(), Some("mdupont"));
    assert_eq!(docs[0].get("dob").unwrap(), None);
    assert_eq!(docs[0].get_array("interests").unwrap().unwrap().len(), 3);
}

#[test]
fn incompatible_comparison_surfaces_mid_scan() {
    let (_store, table) = seeded_store();
    // last_name is a string on every document; ordering against an Int fails
    let stream = table.find_where(Condition::is("last_name", CompareOp::Less, 5));
    assert!(matches!(
        stream.try_collect(),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn scans_are_restartable_snapshots() {
    let (_store, table) = seeded_store();
    let stream = table.find();
    assert_eq!(stream.try_collect().unwrap().len(), 5);

    table
        .insert(Document::with_id("late").set("a", 1).unwrap())
        .unwrap();
    table.delete("jdoe");

    // a replay sees the snapshot, not the current table
    assert_eq!(ids(&stream), id_set(["jdoe", "dsimon", "alehmann", "mdupont", "rsmith"]));
    // a fresh scan sees the current state
    assert_eq!(
        ids(&table.find()),
        id_set(["late", "dsimon", "alehmann", "mdupont", "rsmith"])
    );
}

#[test]
fn tablet_metadata_reflects_document_count() {
    let (_store, table) = seeded_store();
    let tablets = table.tablet_infos();
    assert_eq!(tablets.len(), 1);
    assert_eq!(tablets[0].table_path, TABLE_PATH);
    assert_eq!(tablets[0].doc_count, 5);
}

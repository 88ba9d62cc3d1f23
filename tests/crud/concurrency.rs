//! Concurrent access through shared table handles

use crate::common::*;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn concurrent_inserts_land_independently() {
    let (_store, table) = seeded_store();
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let table = Arc::clone(&table);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for n in 0..25 {
                    table
                        .insert(
                            Document::with_id(format!("w{}-{}", i, n))
                                .set("writer", i as i64)
                                .unwrap(),
                        )
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(table.len(), 5 + 8 * 25);
}

#[test]
fn duplicate_insert_races_produce_exactly_one_winner() {
    let (_store, table) = seeded_store();
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let table = Arc::clone(&table);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                table
                    .insert(Document::with_id("contested").set("writer", i as i64).unwrap())
                    .is_ok()
            })
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.iter().filter(|ok| **ok).count(), 1);
    assert!(table.find_by_id("contested").is_some());
}

#[test]
fn readers_never_observe_a_partial_mutation() {
    let (_store, table) = seeded_store();
    table
        .insert(Document::with_id("pair").set("a", 0).unwrap().set("b", 0).unwrap())
        .unwrap();

    let writer = {
        let table = Arc::clone(&table);
        thread::spawn(move || {
            for n in 1..=300i64 {
                table
                    .update("pair", &Mutation::new().set("a", n).set("b", n))
                    .unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                for _ in 0..300 {
                    let doc = table.find_by_id("pair").unwrap();
                    let a = doc.get_int("a").unwrap().unwrap();
                    let b = doc.get_int("b").unwrap().unwrap();
                    assert_eq!(a, b, "observed a half-applied mutation");
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
}

#[test]
fn scans_stay_consistent_under_concurrent_writes() {
    let (_store, table) = seeded_store();
    let stop = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let writer = {
        let table = Arc::clone(&table);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut n = 0i64;
            while !stop.load(std::sync::atomic::Ordering::Relaxed) {
                n += 1;
                table
                    .update("jdoe", &Mutation::new().set("x", n).set("y", n))
                    .unwrap();
            }
        })
    };

    for _ in 0..50 {
        for doc in table.find().iter() {
            let doc = doc.unwrap();
            if doc.id() == Some("jdoe") {
                // a scanned document is a point-in-time snapshot
                let x = doc.get_int("x").unwrap();
                let y = doc.get_int("y").unwrap();
                assert_eq!(x, y, "scan yielded a torn document");
            }
        }
    }

    stop.store(true, std::sync::atomic::Ordering::Relaxed);
    writer.join().unwrap();
}

#[test]
fn flush_makes_prior_writes_observable() {
    let (_store, table) = seeded_store();
    let barrier = Arc::new(Barrier::new(2));

    let writer = {
        let table = Arc::clone(&table);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            table
                .insert(Document::with_id("flushed").set("ok", true).unwrap())
                .unwrap();
            table.flush();
            barrier.wait();
        })
    };

    barrier.wait();
    // the write happened-before the barrier, so it must be visible
    assert!(table.find_by_id("flushed").is_some());
    writer.join().unwrap();
}

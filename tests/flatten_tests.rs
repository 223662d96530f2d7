// Flattener tests: naming, ordering, idempotence.

mod common;

use cachewatch::flatten::flatten;
use cachewatch::models::MetricKind;
use common::{raw_collection, raw_snapshot};
use std::collections::HashSet;

#[test]
fn collection_then_its_indexes_in_discovery_order() {
    let raw = raw_snapshot(vec![
        raw_collection("app", "users", 1000),
        raw_collection("app", "events", 2000),
    ]);
    let snap = flatten(&raw, 1_000);
    let names: Vec<&str> = snap.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "app.users",
            "app.users._id_",
            "app.users.user_1",
            "app.events",
            "app.events._id_",
            "app.events.user_1",
        ]
    );
    assert_eq!(snap.records[0].kind, MetricKind::Collection);
    assert_eq!(snap.records[1].kind, MetricKind::Index);
}

#[test]
fn flattening_is_idempotent() {
    let raw = raw_snapshot(vec![raw_collection("app", "users", 1000)]);
    assert_eq!(flatten(&raw, 42), flatten(&raw, 42));
}

#[test]
fn names_are_unique_within_a_snapshot() {
    let raw = raw_snapshot(vec![
        raw_collection("app", "users", 1000),
        raw_collection("other", "users", 500),
    ]);
    let snap = flatten(&raw, 0);
    let unique: HashSet<&str> = snap.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(unique.len(), snap.records.len());
}

#[test]
fn index_records_have_no_total_size() {
    let raw = raw_snapshot(vec![raw_collection("app", "users", 1000)]);
    let snap = flatten(&raw, 0);
    for r in snap.records.iter().filter(|r| r.kind == MetricKind::Index) {
        assert_eq!(r.total_size_bytes, 0);
        assert!(r.storage_size_bytes > 0, "index storage size comes from indexSizes");
    }
}

#[test]
fn totals_and_timestamp_are_carried_through() {
    let raw = raw_snapshot(vec![]);
    let snap = flatten(&raw, 99_000);
    assert_eq!(snap.timestamp_ms, 99_000);
    assert_eq!(snap.totals, common::TOTALS);
    assert!(snap.records.is_empty());
}

#[test]
fn collection_record_carries_cache_counters() {
    let raw = raw_snapshot(vec![raw_collection("app", "users", 1234)]);
    let snap = flatten(&raw, 0);
    let coll = &snap.records[0];
    assert_eq!(coll.cached_bytes, 1234);
    assert_eq!(coll.bytes_read, 5000);
    assert_eq!(coll.bytes_written, 100);
    assert_eq!(coll.pages_requested, 42);
    assert_eq!(coll.total_size_bytes, 4096);
    assert_eq!(coll.storage_size_bytes, 2048);
}

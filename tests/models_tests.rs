// Model serialization tests (JSON camelCase wire format)

mod common;

use cachewatch::models::*;
use common::{TOTALS, record, snapshot};

#[test]
fn test_metric_record_serializes_camel_case() {
    let r = record("app.users", MetricKind::Collection, 1000, 5000);
    let json = serde_json::to_string(&r).unwrap();
    assert!(json.contains("\"cachedBytes\""));
    assert!(json.contains("\"totalSizeBytes\""));
    assert!(json.contains("\"pagesRequested\""));
    assert!(json.contains("\"kind\":\"collection\""));
    let back: MetricRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, r);
}

#[test]
fn test_delta_record_flattens_metric_fields() {
    let d = DeltaRecord {
        metric: record("app.users._id_", MetricKind::Index, 300, 9),
        cache_delta_per_sec: 50.0,
        read_per_sec: 20.0,
        written_per_sec: 0.0,
        used_per_sec: 1.5,
    };
    let json = serde_json::to_string(&d).unwrap();
    // Flattened: metric fields sit next to the rate fields.
    assert!(json.contains("\"name\":\"app.users._id_\""));
    assert!(json.contains("\"readPerSec\":20.0"));
    assert!(json.contains("\"cacheDeltaPerSec\":50.0"));
    assert!(!json.contains("\"metric\""));
    let back: DeltaRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, d);
}

#[test]
fn test_transport_mode_wire_names() {
    assert_eq!(serde_json::to_string(&TransportMode::Plain).unwrap(), "\"plain\"");
    assert_eq!(serde_json::to_string(&TransportMode::Tls).unwrap(), "\"tls\"");
    assert_eq!(TransportMode::Tls.to_string(), "tls");
}

#[test]
fn test_cache_report_roundtrip() {
    let report = CacheReport {
        timestamp_ms: 10_000,
        transport: TransportMode::Plain,
        totals: TOTALS,
        records: vec![DeltaRecord {
            metric: record("app.users", MetricKind::Collection, 1000, 5000),
            cache_delta_per_sec: 0.0,
            read_per_sec: 0.0,
            written_per_sec: 0.0,
            used_per_sec: 0.0,
        }],
        partial_failures: 1,
    };
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"totalCacheBytes\""));
    assert!(json.contains("\"partialFailures\":1"));
    let back: CacheReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
}

#[test]
fn test_report_used_cache_bytes_sums_records() {
    let report = CacheReport {
        timestamp_ms: 0,
        transport: TransportMode::Plain,
        totals: TOTALS,
        records: vec![
            DeltaRecord {
                metric: record("a.b", MetricKind::Collection, 700, 0),
                cache_delta_per_sec: 0.0,
                read_per_sec: 0.0,
                written_per_sec: 0.0,
                used_per_sec: 0.0,
            },
            DeltaRecord {
                metric: record("a.b._id_", MetricKind::Index, 300, 0),
                cache_delta_per_sec: 0.0,
                read_per_sec: 0.0,
                written_per_sec: 0.0,
                used_per_sec: 0.0,
            },
        ],
        partial_failures: 0,
    };
    assert_eq!(report.used_cache_bytes(), 1000);
}

#[test]
fn test_flat_snapshot_roundtrip() {
    let snap = snapshot(5_000, vec![record("a.b", MetricKind::Collection, 1, 2)]);
    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"timestampMs\":5000"));
    let back: FlatSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);
}

// Shared test helpers

use cachewatch::models::*;

pub const TOTALS: CacheTotals = CacheTotals {
    total_cache_bytes: 1_073_741_824,
    total_cached_bytes: 52_428_800,
};

pub fn record(name: &str, kind: MetricKind, cached: u64, read: u64) -> MetricRecord {
    MetricRecord {
        name: name.to_string(),
        kind,
        total_size_bytes: match kind {
            MetricKind::Collection => 4096,
            MetricKind::Index => 0,
        },
        storage_size_bytes: 2048,
        cached_bytes: cached,
        bytes_read: read,
        bytes_written: 0,
        pages_requested: 0,
    }
}

pub fn snapshot(timestamp_ms: u64, records: Vec<MetricRecord>) -> FlatSnapshot {
    FlatSnapshot {
        timestamp_ms,
        totals: TOTALS,
        records,
    }
}

pub fn raw_collection(db: &str, coll: &str, cached: u64) -> RawCollectionStats {
    RawCollectionStats {
        database: db.to_string(),
        collection: coll.to_string(),
        data_size_bytes: 4096,
        storage_size_bytes: 2048,
        doc_count: 10,
        avg_doc_size_bytes: 409,
        cached_bytes: cached,
        bytes_read: 5000,
        bytes_written: 100,
        pages_requested: 42,
        indexes: vec![
            RawIndexStats {
                name: "_id_".to_string(),
                storage_size_bytes: 512,
                cached_bytes: 300,
                bytes_read: 9,
                bytes_written: 3,
                pages_requested: 7,
            },
            RawIndexStats {
                name: "user_1".to_string(),
                storage_size_bytes: 256,
                cached_bytes: 200,
                bytes_read: 4,
                bytes_written: 1,
                pages_requested: 2,
            },
        ],
    }
}

pub fn raw_snapshot(collections: Vec<RawCollectionStats>) -> RawSnapshot {
    RawSnapshot {
        totals: TOTALS,
        collections,
        partial_failures: 0,
    }
}

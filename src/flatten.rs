// Flatten a raw snapshot into named metric records.

use crate::models::{FlatSnapshot, MetricKind, MetricRecord, RawSnapshot};

/// Pure and total: one Collection record per collection, followed by one
/// Index record per index, all in discovery order. Names are
/// "db.collection" and "db.collection.index", unique within a snapshot
/// because the server namespaces are.
pub fn flatten(raw: &RawSnapshot, timestamp_ms: u64) -> FlatSnapshot {
    let mut records = Vec::new();
    for coll in &raw.collections {
        let ns = format!("{}.{}", coll.database, coll.collection);
        records.push(MetricRecord {
            name: ns.clone(),
            kind: MetricKind::Collection,
            total_size_bytes: coll.data_size_bytes,
            storage_size_bytes: coll.storage_size_bytes,
            cached_bytes: coll.cached_bytes,
            bytes_read: coll.bytes_read,
            bytes_written: coll.bytes_written,
            pages_requested: coll.pages_requested,
        });
        for index in &coll.indexes {
            records.push(MetricRecord {
                name: format!("{}.{}", ns, index.name),
                kind: MetricKind::Index,
                // Indexes do not report a data size of their own.
                total_size_bytes: 0,
                storage_size_bytes: index.storage_size_bytes,
                cached_bytes: index.cached_bytes,
                bytes_read: index.bytes_read,
                bytes_written: index.bytes_written,
                pages_requested: index.pages_requested,
            });
        }
    }
    FlatSnapshot {
        timestamp_ms,
        totals: raw.totals,
        records,
    }
}

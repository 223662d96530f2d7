// Flattened per-entity metric records and the snapshot that holds them.

use serde::{Deserialize, Serialize};

use super::CacheTotals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    Collection,
    Index,
}

/// One flattened cache-stats row. Identity is `name`
/// ("db.collection" or "db.collection.index").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    pub name: String,
    pub kind: MetricKind,
    /// Uncompressed data size; always 0 for indexes (they do not report one).
    pub total_size_bytes: u64,
    /// Size on disk (collection storageSize, or indexSizes entry).
    pub storage_size_bytes: u64,
    pub cached_bytes: u64,
    /// Cumulative server-lifetime counters (monotonic until a restart).
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub pages_requested: u64,
}

/// Output of the flattener: records in discovery order, names unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatSnapshot {
    pub timestamp_ms: u64,
    pub totals: CacheTotals,
    pub records: Vec<MetricRecord>,
}

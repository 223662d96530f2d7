// Raw server response shapes, one level above the BSON documents.
// Built once per poll by the collector; never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Server-wide WiredTiger cache totals from serverStatus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheTotals {
    /// "maximum bytes configured" - configured cache capacity.
    pub total_cache_bytes: u64,
    /// "bytes currently in the cache" - server-wide resident bytes.
    pub total_cached_bytes: u64,
}

/// Per-index cache counters nested inside a collection's collStats
/// (indexDetails.<name>.cache plus indexSizes.<name>).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIndexStats {
    pub name: String,
    pub storage_size_bytes: u64,
    pub cached_bytes: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub pages_requested: u64,
}

/// One collection's collStats figures, with its indexes in server order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCollectionStats {
    pub database: String,
    pub collection: String,
    /// Uncompressed data size ("size").
    pub data_size_bytes: u64,
    /// Compressed size on disk ("storageSize"); falls back to data size.
    pub storage_size_bytes: u64,
    pub doc_count: u64,
    pub avg_doc_size_bytes: u64,
    pub cached_bytes: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub pages_requested: u64,
    pub indexes: Vec<RawIndexStats>,
}

/// Everything one poll retrieved, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSnapshot {
    pub totals: CacheTotals,
    pub collections: Vec<RawCollectionStats>,
    /// Collections whose collStats failed mid-poll and were skipped.
    pub partial_failures: usize,
}

// Extract WiredTiger cache figures from serverStatus / collStats documents.
// Missing or malformed fields are zero, never errors: the schema drifts
// between server versions and a poll must stay total.

use mongodb::bson::{Bson, Document};

use crate::models::{CacheTotals, RawCollectionStats, RawIndexStats};

/// Cumulative cache counters found under a "cache" subdocument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CacheCounters {
    pub cached_bytes: u64,
    pub bytes_read: u64,
    pub bytes_written: u64,
    pub pages_requested: u64,
}

fn to_u64(value: &Bson) -> u64 {
    match value {
        Bson::Int32(v) => (*v).max(0) as u64,
        Bson::Int64(v) => (*v).max(0) as u64,
        Bson::Double(v) if *v >= 0.0 => *v as u64,
        _ => 0,
    }
}

/// Numeric field lookup tolerating Int32/Int64/Double; absent => 0.
pub(crate) fn num(doc: &Document, key: &str) -> u64 {
    doc.get(key).map(to_u64).unwrap_or(0)
}

fn subdoc<'a>(doc: &'a Document, key: &str) -> Option<&'a Document> {
    doc.get_document(key).ok()
}

/// The "wiredTiger.cache" subdocument of a serverStatus or collStats reply.
fn wiredtiger_cache(doc: &Document) -> Option<&Document> {
    subdoc(doc, "wiredTiger").and_then(|wt| subdoc(wt, "cache"))
}

fn counters(cache: &Document) -> CacheCounters {
    CacheCounters {
        cached_bytes: num(cache, "bytes currently in the cache"),
        bytes_read: num(cache, "bytes read into cache"),
        bytes_written: num(cache, "bytes written from cache"),
        pages_requested: num(cache, "pages requested from the cache"),
    }
}

/// Server-wide cache totals from a serverStatus reply.
pub(crate) fn server_totals(server_status: &Document) -> CacheTotals {
    let cache = wiredtiger_cache(server_status);
    CacheTotals {
        total_cache_bytes: cache.map(|c| num(c, "maximum bytes configured")).unwrap_or(0),
        total_cached_bytes: cache
            .map(|c| num(c, "bytes currently in the cache"))
            .unwrap_or(0),
    }
}

/// Build the raw per-collection stats (with nested indexes, in the
/// server's reported order) from one collStats reply.
pub(crate) fn collection_stats(
    database: &str,
    collection: &str,
    coll_stats: &Document,
) -> RawCollectionStats {
    let coll_counters = wiredtiger_cache(coll_stats).map(counters).unwrap_or_default();

    let data_size_bytes = num(coll_stats, "size");
    let storage_size_bytes = match coll_stats.get("storageSize") {
        Some(v) => to_u64(v),
        None => data_size_bytes,
    };

    let index_sizes = subdoc(coll_stats, "indexSizes");
    let indexes = subdoc(coll_stats, "indexDetails")
        .map(|details| {
            details
                .iter()
                .map(|(name, stats)| {
                    let idx_counters = stats
                        .as_document()
                        .and_then(|d| subdoc(d, "cache"))
                        .map(counters)
                        .unwrap_or_default();
                    RawIndexStats {
                        name: name.clone(),
                        storage_size_bytes: index_sizes.map(|s| num(s, name)).unwrap_or(0),
                        cached_bytes: idx_counters.cached_bytes,
                        bytes_read: idx_counters.bytes_read,
                        bytes_written: idx_counters.bytes_written,
                        pages_requested: idx_counters.pages_requested,
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    RawCollectionStats {
        database: database.to_string(),
        collection: collection.to_string(),
        data_size_bytes,
        storage_size_bytes,
        doc_count: num(coll_stats, "count"),
        avg_doc_size_bytes: num(coll_stats, "avgObjSize"),
        cached_bytes: coll_counters.cached_bytes,
        bytes_read: coll_counters.bytes_read,
        bytes_written: coll_counters.bytes_written,
        pages_requested: coll_counters.pages_requested,
        indexes,
    }
}

// Delta engine: per-second rates between two consecutive flat snapshots.

use std::collections::HashMap;

use crate::models::{DeltaRecord, FlatSnapshot, MetricRecord};

/// Clamped counter rate: a decrease (server restart, counter wrap, or
/// drop+recreate under the same name) yields 0.0 instead of a negative
/// rate.
fn rate(current: u64, previous: u64, elapsed_secs: f64) -> f64 {
    current.saturating_sub(previous) as f64 / elapsed_secs
}

fn no_baseline(metric: &MetricRecord) -> DeltaRecord {
    DeltaRecord {
        metric: metric.clone(),
        cache_delta_per_sec: 0.0,
        read_per_sec: 0.0,
        written_per_sec: 0.0,
        used_per_sec: 0.0,
    }
}

/// Compute per-record rates of change from `previous` to `current`.
///
/// Output preserves `current`'s order and length: records new in `current`
/// get zero rates (no baseline yet), records only in `previous` are
/// dropped (the entity no longer exists). With no previous snapshot, or a
/// non-positive measured elapsed time, every record gets zero rates.
pub fn compute_deltas(previous: Option<&FlatSnapshot>, current: &FlatSnapshot) -> Vec<DeltaRecord> {
    let Some(prev) = previous else {
        return current.records.iter().map(no_baseline).collect();
    };

    // Measured wall-clock time between captures, not the configured
    // interval: a slow poll stretches the denominator.
    let elapsed_secs =
        current.timestamp_ms.saturating_sub(prev.timestamp_ms) as f64 / 1000.0;
    if elapsed_secs <= 0.0 {
        return current.records.iter().map(no_baseline).collect();
    }

    let baseline: HashMap<&str, &MetricRecord> = prev
        .records
        .iter()
        .map(|r| (r.name.as_str(), r))
        .collect();

    current
        .records
        .iter()
        .map(|cur| match baseline.get(cur.name.as_str()) {
            Some(prev) => DeltaRecord {
                metric: cur.clone(),
                cache_delta_per_sec: rate(cur.cached_bytes, prev.cached_bytes, elapsed_secs),
                read_per_sec: rate(cur.bytes_read, prev.bytes_read, elapsed_secs),
                written_per_sec: rate(cur.bytes_written, prev.bytes_written, elapsed_secs),
                used_per_sec: rate(cur.pages_requested, prev.pages_requested, elapsed_secs),
            },
            None => no_baseline(cur),
        })
        .collect()
}

// Per-cycle delta output delivered to presenters.

use serde::{Deserialize, Serialize};

use super::{CacheTotals, MetricRecord};

/// How the session to the server was established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransportMode {
    Plain,
    Tls,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportMode::Plain => f.write_str("plain"),
            TransportMode::Tls => f.write_str("tls"),
        }
    }
}

/// A metric record paired with its per-second rates since the previous
/// sample. Rates are 0.0 when there is no baseline (first sample, new
/// entity, or clock anomaly); counter resets are clamped, never negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaRecord {
    #[serde(flatten)]
    pub metric: MetricRecord,
    pub cache_delta_per_sec: f64,
    pub read_per_sec: f64,
    pub written_per_sec: f64,
    pub used_per_sec: f64,
}

/// One completed cycle's output: deltas in snapshot order plus the
/// server-wide totals. This is what goes over the broadcast channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheReport {
    pub timestamp_ms: u64,
    pub transport: TransportMode,
    pub totals: CacheTotals,
    pub records: Vec<DeltaRecord>,
    pub partial_failures: usize,
}

impl CacheReport {
    /// Sum of cached bytes across all records (the "used cache" pie
    /// denominator).
    pub fn used_cache_bytes(&self) -> u64 {
        self.records.iter().map(|r| r.metric.cached_bytes).sum()
    }
}

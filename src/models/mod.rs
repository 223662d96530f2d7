// Domain models: raw server responses, flattened metrics, delta output.

mod delta;
mod metric;
mod raw;

pub use delta::{CacheReport, DeltaRecord, TransportMode};
pub use metric::{FlatSnapshot, MetricKind, MetricRecord};
pub use raw::{CacheTotals, RawCollectionStats, RawIndexStats, RawSnapshot};

// Presentation layer: console table + pie chart slice computation.

pub mod chart;
pub mod table;

/// Collections occupy ~25% more cache than their data size; used to adjust
/// the "% Cached" display. To be refined with real workload data.
pub const COLLECTION_CACHE_OVERHEAD: f64 = 1.25;
/// Indexes occupy ~20% less cache than their storage size.
pub const INDEX_CACHE_OVERHEAD: f64 = 0.80;

/// Human-readable byte count, binary units.
pub fn fmt_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

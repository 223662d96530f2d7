// Pie chart slice computation for the web presenter.

use serde::{Deserialize, Serialize};

use super::fmt_bytes;
use crate::models::CacheReport;

/// What the slice percentages are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Denominator {
    /// Sum of all records' cached bytes.
    UsedCache,
    /// The server's configured cache capacity; adds an "Unused Cache"
    /// slice for the headroom.
    TotalCache,
}

impl std::str::FromStr for Denominator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "used" => Ok(Denominator::UsedCache),
            "total" => Ok(Denominator::TotalCache),
            other => Err(format!("unknown denominator {other:?} (expected \"used\" or \"total\")")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSlice {
    pub label: String,
    pub cached_bytes: u64,
    pub fraction: f64,
    pub display: String,
}

/// Proportional breakdown of cached bytes across a report's records.
/// Zero-byte records are dropped; a cache fully consumed by tracked
/// entities gets no unused slice even with the TotalCache denominator.
pub fn pie_slices(report: &CacheReport, denominator: Denominator) -> Vec<PieSlice> {
    let used = report.used_cache_bytes();
    let denom = match denominator {
        Denominator::UsedCache => used,
        Denominator::TotalCache => report.totals.total_cache_bytes,
    };

    let mut slices: Vec<PieSlice> = report
        .records
        .iter()
        .filter(|r| r.metric.cached_bytes > 0)
        .map(|r| slice(r.metric.name.clone(), r.metric.cached_bytes, denom))
        .collect();

    if denominator == Denominator::TotalCache {
        let unused = report.totals.total_cache_bytes.saturating_sub(used);
        if unused > 0 {
            slices.push(slice("Unused Cache".to_string(), unused, denom));
        }
    }
    slices
}

fn slice(label: String, cached_bytes: u64, denom: u64) -> PieSlice {
    let fraction = if denom > 0 {
        cached_bytes as f64 / denom as f64
    } else {
        0.0
    };
    let display = format!("{} ({:.1}%)", fmt_bytes(cached_bytes), fraction * 100.0);
    PieSlice {
        label,
        cached_bytes,
        fraction,
        display,
    }
}

// Console table renderer: one full-screen table per report.

use tokio::sync::broadcast;

use super::{COLLECTION_CACHE_OVERHEAD, INDEX_CACHE_OVERHEAD, fmt_bytes};
use crate::models::{CacheReport, DeltaRecord, MetricKind};

const HEADERS: [&str; 10] = [
    "Namespace",
    "Type",
    "Cache Used",
    "Data Size",
    "Storage Size",
    "% Cached",
    "Delta/s",
    "Read/s",
    "Written/s",
    "Used/s",
];

/// "% Cached" with the overhead factor removed, capped at 100%.
/// Collections measure against data size, indexes against storage size.
pub fn cached_pct(record: &DeltaRecord) -> f64 {
    let (overhead, size) = match record.metric.kind {
        MetricKind::Collection => (COLLECTION_CACHE_OVERHEAD, record.metric.total_size_bytes),
        MetricKind::Index => (INDEX_CACHE_OVERHEAD, record.metric.storage_size_bytes),
    };
    if size == 0 {
        return 0.0;
    }
    let adjusted = record.metric.cached_bytes as f64 / overhead;
    (adjusted / size as f64 * 100.0).min(100.0)
}

fn kind_label(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Collection => "Collection",
        MetricKind::Index => "Index",
    }
}

fn row(record: &DeltaRecord) -> [String; 10] {
    let data_size = match record.metric.kind {
        MetricKind::Collection => fmt_bytes(record.metric.total_size_bytes),
        MetricKind::Index => "-".to_string(),
    };
    [
        record.metric.name.clone(),
        kind_label(record.metric.kind).to_string(),
        fmt_bytes(record.metric.cached_bytes),
        data_size,
        fmt_bytes(record.metric.storage_size_bytes),
        format!("{:.1}%", cached_pct(record)),
        format!("{:.0}", record.cache_delta_per_sec),
        format!("{:.0}", record.read_per_sec),
        format!("{:.0}", record.written_per_sec),
        format!("{:.0}", record.used_per_sec),
    ]
}

/// Render a report as an aligned text table, rows sorted by cached bytes
/// descending. Entities with no size figure are omitted, matching the
/// server's habit of reporting empty namespaces.
pub fn render(report: &CacheReport) -> String {
    let mut records: Vec<&DeltaRecord> = report
        .records
        .iter()
        .filter(|r| match r.metric.kind {
            MetricKind::Collection => r.metric.total_size_bytes > 0,
            MetricKind::Index => r.metric.storage_size_bytes > 0,
        })
        .collect();
    records.sort_by(|a, b| b.metric.cached_bytes.cmp(&a.metric.cached_bytes));

    let rows: Vec<[String; 10]> = records.iter().map(|r| row(r)).collect();
    let mut widths: [usize; 10] = HEADERS.map(str::len);
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r.iter()) {
            *w = (*w).max(cell.len());
        }
    }

    let usage_pct = if report.totals.total_cache_bytes > 0 {
        report.totals.total_cached_bytes as f64 / report.totals.total_cache_bytes as f64 * 100.0
    } else {
        0.0
    };
    let mut out = String::new();
    out.push_str(&format!(
        "MongoDB cache usage  ({} | transport: {})\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        report.transport,
    ));
    out.push_str(&format!(
        "Total cache: {}   In use: {} ({:.1}%)\n",
        fmt_bytes(report.totals.total_cache_bytes),
        fmt_bytes(report.totals.total_cached_bytes),
        usage_pct,
    ));
    if report.partial_failures > 0 {
        out.push_str(&format!(
            "({} collection(s) could not be sampled this cycle)\n",
            report.partial_failures
        ));
    }
    out.push('\n');

    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    let separators = widths.map(|w| "-".repeat(w));
    push_line(&mut out, &separators, &widths);
    for r in &rows {
        push_line(&mut out, r, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 10], widths: &[usize; 10]) {
    for (i, (cell, &w)) in cells.iter().zip(widths.iter()).enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        if i < 2 {
            // Namespace and Type left-aligned, numbers right-aligned.
            out.push_str(&format!("{:<w$}", cell, w = w));
        } else {
            out.push_str(&format!("{:>w$}", cell, w = w));
        }
    }
    out.push('\n');
}

/// Console loop: clear the screen and print each report as it arrives.
/// Returns when the broadcast channel closes.
pub async fn run(mut rx: broadcast::Receiver<CacheReport>) {
    loop {
        match rx.recv().await {
            Ok(report) => {
                print!("\x1b[2J\x1b[H");
                print!("{}", render(&report));
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::debug!(missed = n, "table presenter lagged behind reports");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

// Background sampling loop: collect -> flatten -> compute deltas ->
// broadcast, carrying the previous flat snapshot as the baseline.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{broadcast, oneshot};
use tokio::time::{Duration, Instant, interval};

use crate::delta::compute_deltas;
use crate::flatten::flatten;
use crate::models::{CacheReport, FlatSnapshot, RawSnapshot, TransportMode};
use crate::mongo_repo::MongoRepo;

/// Rate limit for the "no receivers" debug line (avoid logging every cycle
/// when no presenter is attached).
const NO_RECEIVERS_WARN_INTERVAL: Duration = Duration::from_secs(300);

/// Repo, output channel, and shutdown for the sampling loop.
pub struct WorkerDeps {
    pub repo: Arc<MongoRepo>,
    pub tx: broadcast::Sender<CacheReport>,
    pub ws_connections: Arc<AtomicUsize>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

/// Loop timing. Stats logging uses a real-time interval, independent of
/// the sample interval.
pub struct WorkerConfig {
    pub sample_interval_secs: u64,
    pub stats_log_interval_secs: u64,
}

/// One pure cycle step: build this cycle's report against the previous
/// baseline and produce the new baseline. The mutable baseline lives only
/// in the loop below; keeping this step pure keeps its rules testable.
pub fn advance(
    previous: Option<&FlatSnapshot>,
    raw: &RawSnapshot,
    transport: TransportMode,
    timestamp_ms: u64,
) -> (CacheReport, FlatSnapshot) {
    let snapshot = flatten(raw, timestamp_ms);
    let records = compute_deltas(previous, &snapshot);
    let report = CacheReport {
        timestamp_ms,
        transport,
        totals: snapshot.totals,
        records,
        partial_failures: raw.partial_failures,
    };
    (report, snapshot)
}

pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        repo,
        tx,
        ws_connections,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        sample_interval_secs,
        stats_log_interval_secs,
    } = config;

    tokio::spawn(async move {
        let mut tick = interval(Duration::from_secs(sample_interval_secs));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut previous: Option<FlatSnapshot> = None;
        let mut cycles_completed: u64 = 0;
        let mut cycles_skipped: u64 = 0;
        let mut partial_failures_total: u64 = 0;
        let mut last_no_receivers_warn: Option<Instant> = None;

        let worker_span = tracing::span!(tracing::Level::DEBUG, "worker", sample_interval_secs);
        let _guard = worker_span.enter();

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let timestamp_ms = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .map(|d| d.as_millis() as u64)
                        .unwrap_or_else(|e| {
                            tracing::warn!(error = %e, operation = "get_timestamp", "system time error");
                            0
                        });

                    let raw = match repo.collect().await {
                        Ok(raw) => raw,
                        Err(e) => {
                            // Skip this cycle's output but keep the baseline:
                            // a failed poll must not erase history.
                            tracing::warn!(error = %e, operation = "collect", "poll failed, skipping cycle");
                            cycles_skipped += 1;
                            continue;
                        }
                    };
                    if raw.partial_failures > 0 {
                        partial_failures_total += raw.partial_failures as u64;
                        tracing::debug!(
                            partial_failures = raw.partial_failures,
                            "some collections were skipped this cycle"
                        );
                    }

                    let (report, snapshot) = advance(
                        previous.as_ref(),
                        &raw,
                        repo.transport(),
                        timestamp_ms,
                    );
                    if tx.send(report).is_err() {
                        let should_warn = last_no_receivers_warn
                            .is_none_or(|t| t.elapsed() >= NO_RECEIVERS_WARN_INTERVAL);
                        if should_warn {
                            tracing::debug!(
                                operation = "broadcast_report",
                                "no presenter attached; broadcast channel has no receivers"
                            );
                            last_no_receivers_warn = Some(Instant::now());
                        }
                    }
                    previous = Some(snapshot);
                    cycles_completed += 1;
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Worker shutting down");
                    break;
                }
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        cycles_completed,
                        cycles_skipped,
                        partial_failures_total,
                        ws_clients = ws_connections.load(Ordering::Relaxed),
                        "app stats"
                    );
                }
            }
        }
    })
}

use anyhow::Result;
use cachewatch::*;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let mut app_config = config::AppConfig::load()?;
    // The connection string is the one thing operators pass ad hoc:
    // argv[1] wins, then MONGODB_URI, then config.toml.
    if let Some(uri) = std::env::args().nth(1) {
        app_config.connection.uri = uri;
    } else if let Ok(uri) = std::env::var("MONGODB_URI") {
        app_config.connection.uri = uri;
    }

    let timeout =
        std::time::Duration::from_millis(app_config.connection.server_selection_timeout_ms);
    let repo = Arc::new(
        mongo_repo::MongoRepo::connect(&app_config.connection.uri, timeout)
            .await
            .map_err(|e| anyhow::anyhow!("connect: {}", e))?,
    );
    tracing::info!(transport = %repo.transport(), "Connected to MongoDB");

    let (tx, _) =
        broadcast::channel::<models::CacheReport>(app_config.presenter.broadcast_capacity);
    let ws_connections = Arc::new(AtomicUsize::new(0));
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let worker_handle = worker::spawn(
        worker::WorkerDeps {
            repo,
            tx: tx.clone(),
            ws_connections: ws_connections.clone(),
            shutdown_rx,
        },
        worker::WorkerConfig {
            sample_interval_secs: app_config.monitoring.sample_interval_secs,
            stats_log_interval_secs: app_config.monitoring.stats_log_interval_secs,
        },
    );

    match app_config.presenter.mode {
        config::PresenterMode::Table => {
            let rx = tx.subscribe();
            tokio::select! {
                _ = presenter::table::run(rx) => {}
                _ = shutdown_signal() => {
                    tracing::info!("Received shutdown signal");
                }
            }
            let _ = shutdown_tx.send(());
            let _ = worker_handle.await;
        }
        config::PresenterMode::Web => {
            let latest = Arc::new(tokio::sync::RwLock::new(None));
            let cache_handle = routes::spawn_report_cache(tx.subscribe(), latest.clone());
            let app = routes::app(tx, latest, ws_connections);
            let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);

            tokio::select! {
                result = axum::serve(listener, app) => {
                    result?;
                }
                _ = shutdown_signal() => {
                    tracing::info!("Received shutdown signal");
                }
            }
            let _ = shutdown_tx.send(());
            let _ = worker_handle.await;
            cache_handle.abort();
        }
    }

    Ok(())
}

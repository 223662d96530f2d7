use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub connection: ConnectionConfig,
    pub monitoring: MonitoringConfig,
    pub presenter: PresenterConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    /// MongoDB connection string; overridable by argv[1] or MONGODB_URI.
    pub uri: String,
    #[serde(default = "default_server_selection_timeout_ms")]
    pub server_selection_timeout_ms: u64,
}

fn default_server_selection_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// Seconds between poll cycles.
    pub sample_interval_secs: u64,
    /// How often to log app stats (cycles, skips, ws clients) at INFO level.
    pub stats_log_interval_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenterMode {
    Table,
    Web,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresenterConfig {
    pub mode: PresenterMode,
    /// Max number of reports kept in the broadcast channel (slow
    /// presenters may lag).
    pub broadcast_capacity: usize,
}

/// Bind address for the web (pie chart) presenter; unused in table mode.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.connection.uri.is_empty(),
            "connection.uri must be non-empty"
        );
        anyhow::ensure!(
            self.connection.server_selection_timeout_ms > 0,
            "connection.server_selection_timeout_ms must be > 0, got {}",
            self.connection.server_selection_timeout_ms
        );
        anyhow::ensure!(
            self.monitoring.sample_interval_secs > 0,
            "monitoring.sample_interval_secs must be > 0, got {}",
            self.monitoring.sample_interval_secs
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        anyhow::ensure!(
            self.presenter.broadcast_capacity > 0,
            "presenter.broadcast_capacity must be > 0, got {}",
            self.presenter.broadcast_capacity
        );
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        Ok(())
    }
}

// MongoDB session + cache stats collection via the official driver.

mod wt;

use std::time::Duration;

use futures_util::TryStreamExt;
use mongodb::Client;
use mongodb::bson::doc;
use mongodb::options::{ClientOptions, Tls, TlsOptions};
use mongodb::results::CollectionType;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{RawSnapshot, TransportMode};

/// Both connection attempts failed; keeps each attempt's cause for
/// diagnostics.
#[derive(Debug, Error)]
#[error("could not connect with or without TLS (plain: {plain}; tls: {tls})")]
pub struct ConnectError {
    pub plain: mongodb::error::Error,
    pub tls: mongodb::error::Error,
}

/// A poll-level failure: nothing useful came back this cycle. Per-collection
/// failures are not errors, they just shrink the snapshot.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("serverStatus failed: {0}")]
    ServerStatus(mongodb::error::Error),
    #[error("listDatabases failed: {0}")]
    ListDatabases(mongodb::error::Error),
}

pub struct MongoRepo {
    client: Client,
    transport: TransportMode,
}

impl MongoRepo {
    /// Connect with automatic TLS detection: try the connection string
    /// as-is first, and only on failure retry with TLS enabled against the
    /// platform trust store. The mode of whichever attempt succeeded is
    /// kept for display.
    pub async fn connect(uri: &str, timeout: Duration) -> Result<Self, ConnectError> {
        match Self::try_connect(uri, timeout, false).await {
            Ok(client) => Ok(Self {
                client,
                transport: TransportMode::Plain,
            }),
            Err(plain) => {
                debug!(error = %plain, "plain connection failed, retrying with TLS");
                match Self::try_connect(uri, timeout, true).await {
                    Ok(client) => Ok(Self {
                        client,
                        transport: TransportMode::Tls,
                    }),
                    Err(tls) => Err(ConnectError { plain, tls }),
                }
            }
        }
    }

    async fn try_connect(
        uri: &str,
        timeout: Duration,
        tls: bool,
    ) -> Result<Client, mongodb::error::Error> {
        let mut options = ClientOptions::parse(uri).await?;
        options.server_selection_timeout = Some(timeout);
        if tls {
            options.tls = Some(Tls::Enabled(TlsOptions::default()));
        }
        let client = Client::with_options(options)?;
        // A ping proves the transport actually works; parse alone does not.
        client.database("admin").run_command(doc! { "ping": 1 }).await?;
        Ok(client)
    }

    pub fn transport(&self) -> TransportMode {
        self.transport
    }

    /// One full poll: server totals, then collStats for every collection
    /// (with nested per-index figures), in the server's discovery order.
    /// A failed collStats skips that collection and continues; views and
    /// system.* collections are excluded.
    pub async fn collect(&self) -> Result<RawSnapshot, CollectError> {
        let admin = self.client.database("admin");
        let server_status = admin
            .run_command(doc! { "serverStatus": 1 })
            .await
            .map_err(CollectError::ServerStatus)?;
        let totals = wt::server_totals(&server_status);

        let db_names = self
            .client
            .list_database_names()
            .await
            .map_err(CollectError::ListDatabases)?;

        let mut collections = Vec::new();
        let mut partial_failures = 0usize;

        for db_name in db_names {
            let db = self.client.database(&db_name);
            let mut cursor = match db.list_collections().await {
                Ok(c) => c,
                Err(e) => {
                    warn!(database = %db_name, error = %e, "listCollections failed, skipping database");
                    partial_failures += 1;
                    continue;
                }
            };
            loop {
                let spec = match cursor.try_next().await {
                    Ok(Some(spec)) => spec,
                    Ok(None) => break,
                    Err(e) => {
                        warn!(database = %db_name, error = %e, "collection listing cursor failed");
                        partial_failures += 1;
                        break;
                    }
                };
                if matches!(spec.collection_type, CollectionType::View) {
                    continue;
                }
                if spec.name.starts_with("system.") {
                    continue;
                }
                match db.run_command(doc! { "collStats": spec.name.as_str() }).await {
                    Ok(stats) => {
                        collections.push(wt::collection_stats(&db_name, &spec.name, &stats));
                    }
                    Err(e) => {
                        // Dropped mid-poll, or a view that slipped through.
                        let ns = format!("{}.{}", db_name, spec.name);
                        debug!(
                            namespace = %ns,
                            error = %e,
                            "collStats failed, skipping collection"
                        );
                        partial_failures += 1;
                    }
                }
            }
        }

        Ok(RawSnapshot {
            totals,
            collections,
            partial_failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_error_reports_both_causes() {
        let err = ConnectError {
            plain: mongodb::error::Error::custom("connection refused"),
            tls: mongodb::error::Error::custom("handshake failed"),
        };
        let msg = err.to_string();
        assert!(msg.contains("plain:"));
        assert!(msg.contains("tls:"));
    }
}

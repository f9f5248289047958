//! Dashboard server lifecycle.

use std::path::Path;

use axum::Router;
use launchdash_core::{DashConfig, LaunchTable};
use tokio::net::TcpListener;

use crate::routes;
use crate::state::AppState;
use crate::{Error, Result};

/// Launchdash HTTP server.
pub struct Server {
    state: AppState,
    addr: String,
}

impl Server {
    /// Create a server for an already loaded table.
    pub fn new(table: LaunchTable, config: &DashConfig) -> Result<Self> {
        Ok(Self {
            state: AppState::new(table, config)?,
            addr: config.bind_addr(),
        })
    }

    /// Load the dataset named by `config.data.path` and create a server.
    pub fn from_config(config: &DashConfig) -> Result<Self> {
        let table = LaunchTable::from_path(Path::new(&config.data.path))?;
        Self::new(table, config)
    }

    /// Address the server will bind.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Shared handler state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// The router, for embedding or testing.
    pub fn router(&self) -> Router {
        routes::router(self.state.clone())
    }

    /// Bind and serve until Ctrl-C.
    pub async fn serve(self) -> Result<()> {
        let listener = TcpListener::bind(&self.addr)
            .await
            .map_err(|source| Error::Serve {
                addr: self.addr.clone(),
                source,
            })?;
        tracing::info!("Dashboard listening on http://{}", self.addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|source| Error::Serve {
                addr: self.addr.clone(),
                source,
            })?;

        tracing::info!("Dashboard stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_missing_file() {
        let mut config = DashConfig::default();
        config.data.path = "/nonexistent/launches.csv".to_string();
        let err = Server::from_config(&config).err().unwrap();
        assert!(err.to_string().contains("/nonexistent/launches.csv"));
    }

    #[test]
    fn test_from_config_loads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("launches.csv");
        std::fs::write(
            &path,
            "Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category\n\
             1,CCAFS LC-40,1,500,F9 v1.0,v1.0\n",
        )
        .unwrap();

        let mut config = DashConfig::default();
        config.data.path = path.to_string_lossy().into_owned();
        config.server.port = 9123;
        let server = Server::from_config(&config).unwrap();
        assert_eq!(server.addr(), "127.0.0.1:9123");
        assert_eq!(server.state().table.len(), 1);
    }
}

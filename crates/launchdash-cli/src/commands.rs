//! `serve` and `summary` subcommands.

use std::io::Write;

use anyhow::Context;
use launchdash_core::{DashConfig, DatasetSummary, LaunchTable};
use launchdash_server::Server;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// `--data`
    pub data: Option<String>,
    /// `--host`
    pub host: Option<String>,
    /// `--port`
    pub port: Option<u16>,
}

impl Overrides {
    /// Fold the overrides into `config`.
    pub fn apply(self, config: &mut DashConfig) {
        if let Some(data) = self.data {
            config.data.path = data;
        }
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

/// Load the dataset and serve the dashboard until Ctrl-C.
pub async fn serve(config: &DashConfig) -> anyhow::Result<()> {
    let server = Server::from_config(config)
        .with_context(|| format!("failed to prepare dashboard from {}", config.data.path))?;
    tracing::info!(
        addr = %server.addr(),
        records = server.state().table.len(),
        "Dashboard ready"
    );
    server.serve().await?;
    Ok(())
}

/// Print per-site statistics as a table or as JSON.
pub fn summary(config: &DashConfig, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let table = LaunchTable::from_path(&config.data.path)
        .with_context(|| format!("failed to load {}", config.data.path))?;
    let summary = DatasetSummary::from_table(&table);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        write_summary_table(&summary, out)?;
    }
    Ok(())
}

fn write_summary_table(summary: &DatasetSummary, out: &mut impl Write) -> std::io::Result<()> {
    let width = summary
        .sites
        .iter()
        .map(|s| s.site.len())
        .chain(std::iter::once("Site".len()))
        .max()
        .unwrap_or(4);

    writeln!(
        out,
        "{:<width$}  {:>8}  {:>9}  {:>7}",
        "Site", "Launches", "Successes", "Rate"
    )?;
    for site in &summary.sites {
        writeln!(
            out,
            "{:<width$}  {:>8}  {:>9}  {:>6.1}%",
            site.site,
            site.launches,
            site.successes,
            site.success_rate * 100.0
        )?;
    }
    writeln!(
        out,
        "{:<width$}  {:>8}  {:>9}  {:>6.1}%",
        "Total",
        summary.records,
        summary.successes,
        summary.success_rate() * 100.0
    )?;
    writeln!(
        out,
        "Payload mass range: {} - {} kg",
        summary.payload_min, summary.payload_max
    )
}

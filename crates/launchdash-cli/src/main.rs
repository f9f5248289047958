//! Launchdash command-line entry point.

mod cli;
mod commands;
mod config_handlers;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};
use commands::Overrides;
use launchdash_core::{ConfigManager, DashConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config_path = args.config.as_deref();
    match args.command {
        Command::Serve { data, host, port } => {
            let mut config = DashConfig::load(config_path)?;
            Overrides { data, host, port }.apply(&mut config);
            commands::serve(&config).await
        }
        Command::Summary { data, json } => {
            let mut config = DashConfig::load(config_path)?;
            Overrides {
                data,
                ..Overrides::default()
            }
            .apply(&mut config);
            commands::summary(&config, json, &mut std::io::stdout().lock())
        }
        Command::Config { action } => {
            config_handlers::handle_config_command(
                config_path,
                action,
                &mut std::io::stdout().lock(),
            )?;
            Ok(())
        }
    }
}

/// Logs go to stderr so `summary --json` output stays clean. `RUST_LOG`
/// overrides the default filter.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "debug,hyper=info"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

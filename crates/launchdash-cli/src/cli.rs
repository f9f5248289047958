//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// Launchdash - SpaceX launch records dashboard
#[derive(Parser, Debug)]
#[command(name = "launchdash")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the dashboard over HTTP
    Serve {
        /// Launch records CSV
        #[arg(long, env = "LAUNCHDASH_DATA_PATH")]
        data: Option<String>,

        /// Bind address
        #[arg(long, env = "LAUNCHDASH_SERVER_HOST")]
        host: Option<String>,

        /// Bind port
        #[arg(short, long, env = "LAUNCHDASH_SERVER_PORT")]
        port: Option<u16>,
    },
    /// Print per-site launch statistics
    Summary {
        /// Launch records CSV
        #[arg(long, env = "LAUNCHDASH_DATA_PATH")]
        data: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Inspect or edit the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,
    /// Print a value by dotted key, e.g. `server.port`
    Get { key: String },
    /// Set a value by dotted key
    Set { key: String, value: String },
    /// Write a default config file
    Init {
        /// Target file instead of the default location
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration as environment variables
    Export {
        /// Format as `--env KEY=VALUE` for docker run
        #[arg(long)]
        docker_env: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_flags() {
        let args =
            Args::try_parse_from(["launchdash", "serve", "--data", "x.csv", "-p", "9000"]);
        match args.map(|a| a.command) {
            Ok(Command::Serve { data, port, .. }) => {
                assert_eq!(data.as_deref(), Some("x.csv"));
                assert_eq!(port, Some(9000));
            }
            other => unreachable!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_set() {
        let args = Args::try_parse_from(["launchdash", "config", "set", "server.port", "9000"]);
        assert!(matches!(
            args.map(|a| a.command),
            Ok(Command::Config {
                action: ConfigAction::Set { .. }
            })
        ));
    }
}

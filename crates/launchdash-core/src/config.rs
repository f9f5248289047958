//! Dashboard configuration.
//!
//! Configuration is a TOML file located through [`ConfigManager`]: an explicit
//! path wins, then the `LAUNCHDASH_CONFIG` environment variable, then
//! `<config dir>/launchdash/config.toml`. A missing file means defaults.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

// ============================================================================
// ConfigManager
// ============================================================================

/// Loading, locating, and exporting a TOML-backed configuration type.
pub trait ConfigManager: Default + Serialize + DeserializeOwned {
    /// Project name; used for the config directory and env var prefix.
    fn project_name() -> &'static str;

    /// Platform default location of the config file.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::project_name()).join("config.toml"))
    }

    /// Name of the environment variable that may point at the config file.
    fn config_env_var() -> String {
        format!("{}_CONFIG", env_prefix(Self::project_name()))
    }

    /// Resolve the config file path: explicit, then env var, then default.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        match std::env::var(Self::config_env_var()) {
            Ok(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => Self::default_config_path(),
        }
    }

    /// Load the configuration, falling back to defaults if no file exists.
    fn load(explicit: Option<&str>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit) else {
            tracing::debug!("No config directory on this platform, using defaults");
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file absent, using defaults");
            return Ok(Self::default());
        }
        let config = Self::load_file(&path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a specific file.
    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config = toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Check semantic constraints after parsing.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Serialize as pretty TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten into `PREFIX_SECTION_KEY=value` pairs, sorted by name.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_env(&env_prefix(Self::project_name()), &value, &mut vars);
        vars.sort();
        Ok(vars)
    }
}

fn env_prefix(project: &str) -> String {
    project.to_uppercase().replace('-', "_")
}

fn flatten_env(prefix: &str, value: &toml::Value, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                let name = format!("{prefix}_{}", key.to_uppercase().replace('-', "_"));
                flatten_env(&name, child, out);
            }
        }
        toml::Value::Array(items) => {
            let joined = items
                .iter()
                .map(scalar_to_string)
                .collect::<Vec<_>>()
                .join(",");
            out.push((prefix.to_string(), joined));
        }
        scalar => out.push((prefix.to_string(), scalar_to_string(scalar))),
    }
}

fn scalar_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// DashConfig
// ============================================================================

/// Top-level Launchdash configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashConfig {
    /// Page heading and browser title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Dataset location.
    #[serde(default)]
    pub data: DataConfig,

    /// HTTP listener.
    #[serde(default)]
    pub server: ServerConfig,

    /// Payload slider.
    #[serde(default)]
    pub slider: SliderConfig,
}

/// Dataset settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the launch CSV.
    #[serde(default = "default_data_path")]
    pub path: String,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Payload range slider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Track minimum (kg).
    #[serde(default)]
    pub min: f64,

    /// Track maximum (kg).
    #[serde(default = "default_slider_max")]
    pub max: f64,

    /// Handle increment (kg).
    #[serde(default = "default_slider_step")]
    pub step: f64,

    /// Initial low handle.
    #[serde(default = "default_low")]
    pub default_low: f64,

    /// Initial high handle.
    #[serde(default = "default_high")]
    pub default_high: f64,

    /// Labelled tick positions.
    #[serde(default = "default_marks")]
    pub marks: Vec<f64>,

    /// Derive `min`/`max` from the data, snapped to `step`.
    #[serde(default)]
    pub fit_to_data: bool,
}

fn default_title() -> String {
    "SpaceX Launch Records Dashboard".to_string()
}

fn default_data_path() -> String {
    "spacex_launch_dash.csv".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_slider_max() -> f64 {
    10000.0
}

fn default_slider_step() -> f64 {
    1000.0
}

fn default_low() -> f64 {
    2500.0
}

fn default_high() -> f64 {
    7500.0
}

fn default_marks() -> Vec<f64> {
    vec![0.0, 2500.0, 5000.0, 7500.0, 10000.0]
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            data: DataConfig::default(),
            server: ServerConfig::default(),
            slider: SliderConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: default_slider_max(),
            step: default_slider_step(),
            default_low: default_low(),
            default_high: default_high(),
            marks: default_marks(),
            fit_to_data: false,
        }
    }
}

impl DashConfig {
    /// `host:port` for the listener. IPv6 literals are bracketed.
    pub fn bind_addr(&self) -> String {
        let host = self.server.host.as_str();
        if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]:{}", self.server.port)
        } else {
            format!("{host}:{}", self.server.port)
        }
    }
}

impl ConfigManager for DashConfig {
    fn project_name() -> &'static str {
        "launchdash"
    }

    fn validate(&self) -> Result<()> {
        if self.data.path.trim().is_empty() {
            return Err(Error::config("data.path must not be empty"));
        }
        if self.slider.step.is_nan() || self.slider.step <= 0.0 {
            return Err(Error::config("slider.step must be positive"));
        }
        if self.slider.default_low > self.slider.default_high {
            return Err(Error::config(
                "slider.default_low must not exceed slider.default_high",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

//! `launchdash config` subcommands.
//!
//! Handlers are generic over [`ConfigManager`] and write their results to a
//! caller-supplied writer so they can be tested without capturing stdout.

use std::io::Write;
use std::path::PathBuf;

use launchdash_core::{ConfigManager, DashConfig, Error, Result};

use crate::cli::ConfigAction;

/// Run a config subcommand against [`DashConfig`].
pub fn handle_config_command(
    config_path: Option<&str>,
    action: ConfigAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        ConfigAction::Path => config_path_cmd::<DashConfig>(config_path, out),
        ConfigAction::Get { key } => config_get::<DashConfig>(config_path, &key, out),
        ConfigAction::Set { key, value } => {
            config_set::<DashConfig>(config_path, &key, &value, out)
        }
        ConfigAction::Init { file, force } => {
            // An explicit --file wins over the global --config.
            let target = file.as_deref().or(config_path);
            config_init::<DashConfig>(target, force, out)
        }
        ConfigAction::Export { docker_env } => {
            let config = DashConfig::load(config_path)?;
            config_export(&config, docker_env, out)
        }
    }
}

/// Print the resolved config file path.
pub fn config_path_cmd<C: ConfigManager>(
    config_path: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))?;
    writeln!(out, "{}", path.display())?;
    if !path.exists() {
        tracing::info!(
            "Config file does not exist yet; run `{} config init` to create it",
            C::project_name()
        );
    }
    Ok(())
}

/// Print a value by dotted key.
pub fn config_get<C: ConfigManager>(
    config_path: Option<&str>,
    key: &str,
    out: &mut impl Write,
) -> Result<()> {
    let config = C::load(config_path)?;
    let tree = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    let value = lookup(&tree, key)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))?;
    writeln!(out, "{}", display_value(value))?;
    Ok(())
}

/// Set a value by dotted key in an existing config file.
///
/// The edited file must still deserialize and validate, so a typo like
/// `server.port = "eighty"` is rejected before anything is written.
pub fn config_set<C: ConfigManager>(
    config_path: Option<&str>,
    key: &str,
    value: &str,
    out: &mut impl Write,
) -> Result<()> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `{} config init` first.",
            path.display(),
            C::project_name()
        )));
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut tree: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
    insert(&mut tree, key, infer_value(value))?;

    let updated: C = tree
        .clone()
        .try_into()
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;
    updated.validate()?;

    let rendered = toml::to_string_pretty(&tree).map_err(|e| Error::config(e.to_string()))?;
    std::fs::write(&path, rendered).map_err(|e| Error::io_with_path(e, &path))?;
    writeln!(out, "Set {key} = {value} in {}", path.display())?;
    Ok(())
}

/// Write a default config file.
pub fn config_init<C: ConfigManager>(
    file: Option<&str>,
    force: bool,
    out: &mut impl Write,
) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => C::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };
    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    std::fs::write(&path, C::default().to_toml_string()?)
        .map_err(|e| Error::io_with_path(e, &path))?;
    writeln!(out, "Config file created at {}", path.display())?;
    Ok(())
}

/// Print the configuration as environment variables.
pub fn config_export<C: ConfigManager>(
    config: &C,
    docker_env: bool,
    out: &mut impl Write,
) -> Result<()> {
    for (key, value) in config.to_env_vars()? {
        if docker_env {
            writeln!(out, "--env {key}={value}")?;
        } else {
            writeln!(out, "{key}={value}")?;
        }
    }
    Ok(())
}

// ============================================================================
// Dotted-key helpers
// ============================================================================

/// Walk `a.b.c` through nested tables.
pub fn lookup<'a>(tree: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(tree, |node, part| node.as_table()?.get(part))
}

/// Insert at `a.b.c`, creating missing tables along the way.
pub fn insert(tree: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        return Err(Error::config("Empty key path"));
    }

    let mut node = tree;
    for part in parents.into_iter().flat_map(|p| p.split('.')) {
        let table = node
            .as_table_mut()
            .ok_or_else(|| Error::config(format!("Cannot descend into non-table at '{part}'")))?;
        node = table
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    node.as_table_mut()
        .ok_or_else(|| Error::config(format!("Cannot set '{leaf}' on a non-table value")))?
        .insert(leaf.to_string(), value);
    Ok(())
}

/// Interpret a command-line value: bool, integer, float, `[a, b]` list, or string.
pub fn infer_value(raw: &str) -> toml::Value {
    let trimmed = raw.trim();
    if let Ok(b) = trimmed.parse::<bool>() {
        return toml::Value::Boolean(b);
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return toml::Value::Float(f);
    }
    if let Some(inner) = trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        let items = inner
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(infer_value)
            .collect();
        return toml::Value::Array(items);
    }
    toml::Value::String(raw.to_string())
}

fn display_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

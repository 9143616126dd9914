//! Configuration loader
//!
//! Loads engine configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If none are set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports TOML and JSON formats
//!
//! ## Environment Variables
//! - `ROLLCALL_TOKEN_PAD_WIDTH`: zero-pad width for numeric biometric tokens
//! - `ROLLCALL_BATCH_CONCURRENCY`: worker pool bound for batch evaluation
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.toml` or `./config.json`
//! 2. `./rollcall.toml` or `./rollcall.json`
//! 3. The same names in the parent directory

use std::path::{Path, PathBuf};

use rollcall_domain::{EngineConfig, Result, RollcallError};

const ENV_TOKEN_PAD_WIDTH: &str = "ROLLCALL_TOKEN_PAD_WIDTH";
const ENV_BATCH_CONCURRENCY: &str = "ROLLCALL_BATCH_CONCURRENCY";

/// Load configuration with automatic fallback strategy
///
/// Environment variables win; if neither is set, a config file is probed;
/// if no file exists either, the defaults apply.
///
/// # Errors
/// Returns `RollcallError::Config` if a present source is malformed.
pub fn load() -> Result<EngineConfig> {
    if let Some(config) = load_from_env()? {
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }
    match probe_config_file() {
        Some(path) => {
            tracing::info!(path = %path.display(), "Configuration loaded from file");
            load_from_file(&path)
        }
        None => {
            tracing::debug!("No configuration source found; using defaults");
            Ok(EngineConfig::default())
        }
    }
}

/// Load configuration from environment variables.
///
/// Returns `Ok(None)` when neither variable is set; partial settings fall
/// back to defaults for the missing fields.
pub fn load_from_env() -> Result<Option<EngineConfig>> {
    let pad_width = read_env_usize(ENV_TOKEN_PAD_WIDTH)?;
    let concurrency = read_env_usize(ENV_BATCH_CONCURRENCY)?;
    if pad_width.is_none() && concurrency.is_none() {
        return Ok(None);
    }
    let defaults = EngineConfig::default();
    Ok(Some(EngineConfig {
        token_pad_width: pad_width.unwrap_or(defaults.token_pad_width),
        batch_concurrency: concurrency.unwrap_or(defaults.batch_concurrency),
    }))
}

/// Load configuration from a TOML or JSON file, by extension.
pub fn load_from_file(path: &Path) -> Result<EngineConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        RollcallError::Config(format!("cannot read {}: {e}", path.display()))
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&contents)
            .map_err(|e| RollcallError::Config(format!("invalid TOML in {}: {e}", path.display()))),
        Some("json") => serde_json::from_str(&contents)
            .map_err(|e| RollcallError::Config(format!("invalid JSON in {}: {e}", path.display()))),
        other => Err(RollcallError::Config(format!(
            "unsupported config format {other:?} for {}",
            path.display()
        ))),
    }
}

fn read_env_usize(name: &str) -> Result<Option<usize>> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| RollcallError::Config(format!("{name} must be an integer, got {value:?}"))),
        Err(_) => Ok(None),
    }
}

fn probe_config_file() -> Option<PathBuf> {
    let names = ["config.toml", "config.json", "rollcall.toml", "rollcall.json"];
    let dirs = [PathBuf::from("."), PathBuf::from("..")];
    for dir in &dirs {
        for name in &names {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

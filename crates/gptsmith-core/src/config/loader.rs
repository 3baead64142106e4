//! Config loader — reads `~/.gptsmith/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `EditorConfig::default()`)
//! 2. JSON file at `~/.gptsmith/config.json`
//! 3. Environment variables `GPTSMITH_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::EditorConfig;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path (or `path`) + env vars.
///
/// Falls back to `EditorConfig::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> EditorConfig {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    apply_env_overrides(load_config_from_path(&config_path))
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> EditorConfig {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return EditorConfig::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return EditorConfig::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            EditorConfig::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &EditorConfig, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Supported overrides:
/// - `GPTSMITH_EXPORT__OUTPUT_DIR` → `export.output_dir`
/// - `GPTSMITH_EXPORT__DEFAULT_STEM` → `export.default_stem`
/// - `GPTSMITH_CLIPBOARD__COMMAND` → `clipboard.command` (split on whitespace)
/// - `GPTSMITH_CLIPBOARD__FLASH_MS` → `clipboard.flash_ms`
/// - `GPTSMITH_DOCUMENT__CREATED_AT` → `document.created_at`
fn apply_env_overrides(config: EditorConfig) -> EditorConfig {
    apply_overrides(config, |key| std::env::var(key).ok())
}

fn apply_overrides(
    mut config: EditorConfig,
    var: impl Fn(&str) -> Option<String>,
) -> EditorConfig {
    if let Some(val) = var("GPTSMITH_EXPORT__OUTPUT_DIR") {
        config.export.output_dir = val;
    }
    if let Some(val) = var("GPTSMITH_EXPORT__DEFAULT_STEM") {
        config.export.default_stem = val;
    }
    if let Some(val) = var("GPTSMITH_CLIPBOARD__COMMAND") {
        let parts: Vec<String> = val.split_whitespace().map(String::from).collect();
        config.clipboard.command = (!parts.is_empty()).then_some(parts);
    }
    if let Some(val) = var("GPTSMITH_CLIPBOARD__FLASH_MS") {
        match val.parse::<u64>() {
            Ok(ms) => config.clipboard.flash_ms = ms,
            Err(_) => warn!("Ignoring GPTSMITH_CLIPBOARD__FLASH_MS={val}: not a number"),
        }
    }
    if let Some(val) = var("GPTSMITH_DOCUMENT__CREATED_AT") {
        match val.parse() {
            Ok(mode) => config.document.created_at = mode,
            Err(e) => warn!("Ignoring GPTSMITH_DOCUMENT__CREATED_AT: {e}"),
        }
    }
    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

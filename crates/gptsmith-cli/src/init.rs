//! `gptsmith init` — write the default config and data directories.
//!
//! Existing files are never overwritten.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use gptsmith_core::config::{get_config_path, save_config, EditorConfig};
use gptsmith_core::utils::{get_data_path, get_history_path};

/// Run the init command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "⚒ GPT Smith — Setup".cyan().bold());
    println!();

    let data_dir = get_data_path();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;

    // 1. Config
    let config_path = get_config_path();
    if ensure_config(&config_path)? {
        println!("  {} created config at {}", "✓".green(), config_path.display());
    } else {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    }

    // 2. History directory
    let history_dir = get_history_path();
    std::fs::create_dir_all(&history_dir)?;
    println!("  {} history dir at {}", "✓".green(), history_dir.display());

    println!();
    println!(
        "{}",
        "  Setup complete! Run `gptsmith edit` to start building.".green()
    );
    println!();

    Ok(())
}

/// Write a default config if none exists. Returns whether one was written.
fn ensure_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&EditorConfig::default(), Some(path))
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_config_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(ensure_config(&path).unwrap());

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["export"]["defaultStem"], "custom-gpt");
        assert_eq!(raw["document"]["createdAt"], "session");
    }

    #[test]
    fn ensure_config_keeps_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{\"clipboard\":{\"flashMs\":1}}").unwrap();
        assert!(!ensure_config(&path).unwrap());
        // Should NOT overwrite
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\"clipboard\":{\"flashMs\":1}}"
        );
    }
}

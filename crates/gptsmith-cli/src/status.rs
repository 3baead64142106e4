//! `gptsmith status` — show the effective editor configuration.

use anyhow::Result;
use colored::Colorize;

use gptsmith_core::config::{get_config_path, load_config};
use gptsmith_core::export::SystemClipboard;
use gptsmith_core::utils::expand_home;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "⚒ GPT Smith Status".cyan().bold());
    println!();

    // Config
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found, using defaults)".red().to_string()
        }
    );

    // Output directory
    let output_dir = expand_home(&config.export.output_dir);
    println!(
        "  {:<18} {} {}",
        "Output dir:".bold(),
        output_dir.display(),
        if output_dir.is_dir() {
            "✓".green().to_string()
        } else {
            "(will be created on save)".dimmed().to_string()
        }
    );
    println!(
        "  {:<18} {}.json",
        "Fallback name:".bold(),
        config.export.default_stem
    );

    // Clipboard
    let clipboard = SystemClipboard::new(config.clipboard.command.as_deref());
    let source = if config.clipboard.command.is_some() {
        "configured"
    } else {
        "auto-detected"
    };
    println!(
        "  {:<18} {} {}",
        "Clipboard:".bold(),
        clipboard.command_line(),
        format!("({source}, signal {} ms)", config.clipboard.flash_ms).dimmed()
    );

    // Document
    println!(
        "  {:<18} {}",
        "createdAt:".bold(),
        config.document.created_at
    );

    println!();

    Ok(())
}

//! GPT Smith CLI — entry point.
//!
//! # Commands
//!
//! - `gptsmith edit [--from FILE]` — interactive document editor
//! - `gptsmith init` — write default config + data dirs
//! - `gptsmith status` — show effective configuration
//! - `gptsmith check FILE` — lint an exported document

mod check;
mod commands;
mod helpers;
mod init;
mod repl;
mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use gptsmith_core::config::load_config;
use gptsmith_core::{Editor, GptDocument};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// ⚒ GPT Smith — build Custom GPT definitions from the terminal
#[derive(Parser)]
#[command(name = "gptsmith", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive editor
    Edit {
        /// Start from a previously exported document
        #[arg(short, long)]
        from: Option<PathBuf>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Initialize configuration and data directories
    Init,

    /// Show the effective configuration
    Status,

    /// Parse an exported document and report probable mistakes
    Check {
        /// Path to the exported JSON file
        file: PathBuf,
    },
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Edit { from, logs } => {
            init_logging(logs);
            run_editor(from).await
        }
        Commands::Init => init::run(),
        Commands::Status => status::run(),
        Commands::Check { file } => check::run(&file),
    }
}

// ─────────────────────────────────────────────
// Edit command
// ─────────────────────────────────────────────

async fn run_editor(from: Option<PathBuf>) -> Result<()> {
    let config = load_config(None);
    let mode = config.document.created_at;

    let editor = match from {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let doc = GptDocument::from_json(&content)
                .with_context(|| format!("{} is not a valid GPT document", path.display()))?;
            info!(path = %path.display(), "resuming from exported document");
            Editor::from_document(&doc, mode)
        }
        None => Editor::new(mode),
    };

    repl::run(repl::Session::new(editor, &config)).await
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("gptsmith=debug,gptsmith_core=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

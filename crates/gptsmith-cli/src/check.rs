//! `gptsmith check FILE` — parse an exported document and lint it.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use gptsmith_core::lint::{lint, LintWarning};
use gptsmith_core::GptDocument;

use crate::helpers;

/// Run the check command.
pub fn run(path: &Path) -> Result<()> {
    let (doc, warnings) = check_file(path)?;

    println!();
    println!(
        "{} {} {}",
        "⚒".cyan().bold(),
        path.display(),
        format!("(schema {}, created {})", doc.schema_version, doc.created_at).dimmed()
    );
    helpers::print_warnings(&warnings);
    println!();

    Ok(())
}

/// Load a document and collect its lint warnings.
pub fn check_file(path: &Path) -> Result<(GptDocument, Vec<LintWarning>)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let doc = GptDocument::from_json(&content)
        .with_context(|| format!("{} is not a valid GPT document", path.display()))?;
    let warnings = lint(&doc);
    Ok((doc, warnings))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

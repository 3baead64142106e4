//! Export — JSON serialization, clipboard copy, and file save.
//!
//! These are the only side-effecting operations. They always take an
//! already-derived [`GptDocument`]; nothing here mutates editor state.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::document::GptDocument;
use crate::error::ExportError;
use crate::utils::safe_filename;

/// MIME type of exported files.
pub const MIME_TYPE: &str = "application/json";

/// Serialize a document as JSON with 2-space indentation.
pub fn to_json(doc: &GptDocument) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// File name for a document: `{name}.json`, or `{default_stem}.json` when
/// the name is blank. The name is trimmed; path separators and characters
/// reserved by common filesystems are replaced.
pub fn export_file_name(name: &str, default_stem: &str) -> String {
    let trimmed = name.trim();
    let stem = if trimmed.is_empty() {
        default_stem.to_string()
    } else {
        safe_filename(trimmed)
    };
    format!("{stem}.json")
}

/// Write the document to `dir/{name-or-default}.json`, returning the path.
pub fn save_to_dir(doc: &GptDocument, dir: &Path, default_stem: &str) -> Result<PathBuf, ExportError> {
    let path = dir.join(export_file_name(&doc.name, default_stem));
    save_to_path(doc, &path)?;
    Ok(path)
}

/// Write the document to an explicit path, creating parent directories.
pub fn save_to_path(doc: &GptDocument, path: &Path) -> Result<(), ExportError> {
    let json = to_json(doc)?;
    let write_err = |source: std::io::Error| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, json).map_err(write_err)?;
    info!(path = %path.display(), mime = MIME_TYPE, "document saved");
    Ok(())
}

// ─────────────────────────────────────────────
// Clipboard
// ─────────────────────────────────────────────

/// Anything that can receive copied text.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ExportError>;

    /// Display name for logging.
    fn name(&self) -> &str;
}

/// Upper bound on how long a clipboard command may take to accept input.
const CLIPBOARD_TIMEOUT: Duration = Duration::from_secs(5);

/// Clipboard backed by a platform command that reads from stdin.
pub struct SystemClipboard {
    program: String,
    args: Vec<String>,
}

impl SystemClipboard {
    /// Use an explicit command (`["xclip", "-selection", "clipboard"]`), or
    /// detect one for the current platform when `command` is `None`.
    pub fn new(command: Option<&[String]>) -> Self {
        let argv: Vec<String> = match command {
            Some(cmd) if !cmd.is_empty() => cmd.to_vec(),
            _ => detect_command().iter().map(|s| s.to_string()).collect(),
        };
        let mut parts = argv.into_iter();
        let program = parts.next().unwrap_or_default();
        Self {
            program,
            args: parts.collect(),
        }
    }

    /// The full command line, for status output.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Pick a clipboard command for the current platform.
fn detect_command() -> &'static [&'static str] {
    if cfg!(target_os = "macos") {
        &["pbcopy"]
    } else if cfg!(target_os = "windows") {
        &["clip"]
    } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
        &["wl-copy"]
    } else {
        &["xclip", "-selection", "clipboard"]
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ExportError> {
        debug!(command = %self.command_line(), "writing to clipboard");

        // Helpers such as xclip and wl-copy leave a forked child owning the
        // selection; it must not inherit any pipe we wait on.
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExportError::Clipboard(format!("{}: {e}", self.program)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|e| ExportError::Clipboard(e.to_string()))?;
        }

        let status = match tokio::time::timeout(CLIPBOARD_TIMEOUT, child.wait()).await {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => return Err(ExportError::Clipboard(e.to_string())),
            Err(_) => {
                return Err(ExportError::Clipboard(format!(
                    "{} timed out after {} seconds",
                    self.program,
                    CLIPBOARD_TIMEOUT.as_secs()
                )))
            }
        };

        if status.success() {
            Ok(())
        } else {
            Err(ExportError::Clipboard(format!(
                "{} exited with {status}",
                self.program
            )))
        }
    }

    fn name(&self) -> &str {
        &self.program
    }
}

/// Serialize the document and place it on the clipboard.
pub async fn copy_to_clipboard(doc: &GptDocument, clipboard: &dyn Clipboard) -> Result<(), ExportError> {
    let json = to_json(doc)?;
    clipboard.write_text(&json).await?;
    info!(clipboard = clipboard.name(), bytes = json.len(), "document copied");
    Ok(())
}

// ─────────────────────────────────────────────
// Flash
// ─────────────────────────────────────────────

/// A transient success signal that clears itself after a fixed duration.
#[derive(Clone, Debug)]
pub struct Flash {
    duration: Duration,
    raised_at: Option<Instant>,
}

impl Flash {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            raised_at: None,
        }
    }

    /// Raise (or re-raise) the signal at `now`.
    pub fn trigger(&mut self, now: Instant) {
        self.raised_at = Some(now);
    }

    /// Whether the signal is still visible at `now`. Expired signals clear.
    pub fn is_active(&mut self, now: Instant) -> bool {
        match self.raised_at {
            Some(at) if now.saturating_duration_since(at) < self.duration => true,
            Some(_) => {
                self.raised_at = None;
                false
            }
            None => false,
        }
    }

    /// Time left before the signal clears, or `None` when it is not showing.
    pub fn remaining(&mut self, now: Instant) -> Option<Duration> {
        if !self.is_active(now) {
            return None;
        }
        let raised_at = self.raised_at?;
        Some(self.duration.saturating_sub(now.saturating_duration_since(raised_at)))
    }
}

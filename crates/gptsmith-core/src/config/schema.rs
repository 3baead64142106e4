//! Configuration schema for the editor itself (not the exported document).
//!
//! Hierarchy: `EditorConfig` → `ExportConfig`, `ClipboardConfig`,
//! `DocumentConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// File stem used when the document has no name.
pub const DEFAULT_FILE_STEM: &str = "custom-gpt";

/// How long the "copied" signal stays visible.
pub const DEFAULT_FLASH_MS: u64 = 1200;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.gptsmith/config.json` + env vars.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub export: ExportConfig,
    pub clipboard: ClipboardConfig,
    pub document: DocumentConfig,
}

// ─────────────────────────────────────────────
// Export
// ─────────────────────────────────────────────

/// Where saved documents go.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    /// Directory for `save` without an explicit path (`~` is expanded).
    pub output_dir: String,
    /// Stem used when the document name is blank.
    pub default_stem: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            default_stem: DEFAULT_FILE_STEM.to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Clipboard
// ─────────────────────────────────────────────

/// Clipboard integration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClipboardConfig {
    /// Program + args that read the text from stdin. Auto-detected if unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    /// Duration of the "copied" signal in milliseconds.
    pub flash_ms: u64,
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            command: None,
            flash_ms: DEFAULT_FLASH_MS,
        }
    }
}

// ─────────────────────────────────────────────
// Document
// ─────────────────────────────────────────────

/// When the exported `createdAt` timestamp is taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatedAtMode {
    /// Once, when the editing session starts (or from the imported document).
    #[default]
    Session,
    /// Fresh on every derivation.
    Derivation,
}

impl fmt::Display for CreatedAtMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session => f.write_str("session"),
            Self::Derivation => f.write_str("derivation"),
        }
    }
}

impl FromStr for CreatedAtMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "session" => Ok(Self::Session),
            "derivation" => Ok(Self::Derivation),
            other => Err(format!("unknown createdAt mode: {other}")),
        }
    }
}

/// Document derivation settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentConfig {
    pub created_at: CreatedAtMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.export.output_dir, ".");
        assert_eq!(config.export.default_stem, "custom-gpt");
        assert_eq!(config.clipboard.flash_ms, 1200);
        assert!(config.clipboard.command.is_none());
        assert_eq!(config.document.created_at, CreatedAtMode::Session);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "clipboard": { "flashMs": 500 } }"#).unwrap();
        assert_eq!(config.clipboard.flash_ms, 500);
        assert_eq!(config.export.default_stem, "custom-gpt");
    }

    #[test]
    fn test_created_at_mode_parse() {
        assert_eq!("Derivation".parse::<CreatedAtMode>().unwrap(), CreatedAtMode::Derivation);
        assert_eq!(" session ".parse::<CreatedAtMode>().unwrap(), CreatedAtMode::Session);
        assert!("later".parse::<CreatedAtMode>().is_err());
    }
}

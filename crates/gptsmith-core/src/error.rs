//! Library error types.
//!
//! Aggregation itself never fails; errors only arise at the edges
//! (parsing user-supplied choices, writing exports).

use std::path::PathBuf;

use thiserror::Error;

/// A string did not name any option of a [`Choice`](crate::document::Choice) set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{input}' (expected one of: {expected})")]
pub struct ChoiceError {
    pub kind: &'static str,
    pub input: String,
    pub expected: String,
}

/// Failure while exporting a document to the clipboard or a file.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

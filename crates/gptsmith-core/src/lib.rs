//! GPT Smith core — document model, field aggregation, and export.
//!
//! This crate contains:
//! - **document**: the exported `GptDocument` and its enumerated choices
//! - **list**: the generic draft-and-commit `ListEditor`
//! - **fields** / **editor**: editable state and the pure projection into a document
//! - **export**: JSON, clipboard, and file output
//! - **config**: editor settings loaded from `~/.gptsmith/config.json`

pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod export;
pub mod fields;
pub mod lint;
pub mod list;
pub mod utils;

pub use document::GptDocument;
pub use editor::{Edit, EditOutcome, Editor};
pub use error::{ChoiceError, ExportError};
pub use fields::{derive_document, Fields};
pub use list::{ListEditor, ListItem};

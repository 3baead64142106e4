//! Non-blocking checks on a derived document.

use std::fmt;

use crate::document::GptDocument;

/// Something in the document that is probably a mistake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LintWarning {
    MissingName,
    MissingInstructions,
    KnowledgeWithoutDocuments,
    MemoryWithoutRetention,
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::MissingName => "name is empty",
            Self::MissingInstructions => "instructions are empty",
            Self::KnowledgeWithoutDocuments => "knowledge is enabled but no documents are listed",
            Self::MemoryWithoutRetention => "memory is enabled with 0 retention days",
        };
        f.write_str(msg)
    }
}

/// Collect warnings for a document. Never blocks export.
pub fn lint(doc: &GptDocument) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    if doc.name.trim().is_empty() {
        warnings.push(LintWarning::MissingName);
    }
    if doc.instructions.trim().is_empty() {
        warnings.push(LintWarning::MissingInstructions);
    }
    if doc.knowledge.enabled && doc.knowledge.documents.is_empty() {
        warnings.push(LintWarning::KnowledgeWithoutDocuments);
    }
    if doc.memory.enabled && doc.memory.data_retention_days == 0 {
        warnings.push(LintWarning::MemoryWithoutRetention);
    }
    warnings
}

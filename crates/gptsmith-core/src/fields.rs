//! Editable field state and the pure projection into a [`GptDocument`].
//!
//! `Fields` is the source of truth. The document is rebuilt from scratch by
//! [`derive_document`] whenever any field changes.

use chrono::{DateTime, Utc};

use crate::document::{
    BuiltInTool, ConversationStarter, CustomAction, GptDocument, Knowledge, Memory, MemoryScope,
    Persona, Safety, SCHEMA_VERSION,
};
use crate::list::ListEditor;

/// Retention text shown in a fresh session.
pub const DEFAULT_RETENTION_DAYS: &str = "30";

// ─────────────────────────────────────────────
// ToolFlags
// ─────────────────────────────────────────────

/// One independent switch per built-in tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolFlags {
    pub web: bool,
    pub code: bool,
    pub retrieval: bool,
    pub image: bool,
    pub vision: bool,
}

impl Default for ToolFlags {
    fn default() -> Self {
        Self {
            web: true,
            code: false,
            retrieval: false,
            image: false,
            vision: false,
        }
    }
}

impl ToolFlags {
    /// Build flags from any collection of enabled tools.
    pub fn from_enabled<'a>(tools: impl IntoIterator<Item = &'a BuiltInTool>) -> Self {
        let mut flags = Self {
            web: false,
            ..Self::default()
        };
        for tool in tools {
            flags.set(*tool, true);
        }
        flags
    }

    pub fn get(&self, tool: BuiltInTool) -> bool {
        match tool {
            BuiltInTool::Web => self.web,
            BuiltInTool::Code => self.code,
            BuiltInTool::Retrieval => self.retrieval,
            BuiltInTool::Image => self.image,
            BuiltInTool::Vision => self.vision,
        }
    }

    pub fn set(&mut self, tool: BuiltInTool, enabled: bool) {
        let slot = match tool {
            BuiltInTool::Web => &mut self.web,
            BuiltInTool::Code => &mut self.code,
            BuiltInTool::Retrieval => &mut self.retrieval,
            BuiltInTool::Image => &mut self.image,
            BuiltInTool::Vision => &mut self.vision,
        };
        *slot = enabled;
    }

    /// Enabled tools in canonical order (web, code, retrieval, image, vision).
    pub fn enabled(&self) -> Vec<BuiltInTool> {
        [
            BuiltInTool::Web,
            BuiltInTool::Code,
            BuiltInTool::Retrieval,
            BuiltInTool::Image,
            BuiltInTool::Vision,
        ]
        .into_iter()
        .filter(|tool| self.get(*tool))
        .collect()
    }
}

// ─────────────────────────────────────────────
// Fields
// ─────────────────────────────────────────────

/// Everything the user can edit in one session.
#[derive(Clone, Debug, PartialEq)]
pub struct Fields {
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub language: String,
    pub persona: Persona,
    pub tools: ToolFlags,
    pub actions: ListEditor<CustomAction>,
    pub knowledge_enabled: bool,
    pub documents: ListEditor<String>,
    pub memory_enabled: bool,
    pub memory_scope: MemoryScope,
    /// Free text; coerced to whole days at derivation time.
    pub retention_days: String,
    pub jailbreak_defense: bool,
    pub block_disallowed_content: bool,
    pub pii_redaction: bool,
    pub disallowed_phrases: ListEditor<String>,
    pub starters: ListEditor<ConversationStarter>,
    pub sample_questions: ListEditor<String>,
    pub tags: ListEditor<String>,
}

impl Default for Fields {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            instructions: String::new(),
            language: "en".to_string(),
            persona: Persona::default(),
            tools: ToolFlags::default(),
            actions: ListEditor::default(),
            knowledge_enabled: false,
            documents: ListEditor::default(),
            memory_enabled: false,
            memory_scope: MemoryScope::default(),
            retention_days: DEFAULT_RETENTION_DAYS.to_string(),
            jailbreak_defense: true,
            block_disallowed_content: true,
            pii_redaction: false,
            disallowed_phrases: ListEditor::default(),
            starters: ListEditor::default(),
            sample_questions: ListEditor::default(),
            tags: ListEditor::default(),
        }
    }
}

impl Fields {
    /// Seed field state from a previously exported document.
    ///
    /// All drafts start empty. `createdAt` is not a field and is ignored here.
    pub fn from_document(doc: &GptDocument) -> Self {
        Self {
            name: doc.name.clone(),
            description: doc.description.clone(),
            instructions: doc.instructions.clone(),
            language: doc.language.clone(),
            persona: doc.persona,
            tools: ToolFlags::from_enabled(&doc.built_in_tools),
            actions: ListEditor::with_items(doc.custom_actions.clone()),
            knowledge_enabled: doc.knowledge.enabled,
            documents: ListEditor::with_items(doc.knowledge.documents.clone()),
            memory_enabled: doc.memory.enabled,
            memory_scope: doc.memory.scope,
            retention_days: doc.memory.data_retention_days.to_string(),
            jailbreak_defense: doc.safety.jailbreak_defense,
            block_disallowed_content: doc.safety.block_disallowed_content,
            pii_redaction: doc.safety.pii_redaction,
            disallowed_phrases: ListEditor::with_items(doc.safety.custom_disallowed_phrases.clone()),
            starters: ListEditor::with_items(doc.conversation_starters.clone()),
            sample_questions: ListEditor::with_items(doc.sample_questions.clone()),
            tags: ListEditor::with_items(doc.tags.clone()),
        }
    }
}

/// Coerce free-text retention input to whole days.
///
/// Blank input is 0, unparseable or non-finite input is 0, negatives clamp
/// to 0, fractions truncate, and huge values saturate at `u32::MAX`.
pub fn coerce_retention_days(input: &str) -> u32 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<f64>() {
        Ok(days) if days.is_finite() && days > 0.0 => days.trunc() as u32,
        _ => 0,
    }
}

/// Project field state into a fresh document.
pub fn derive_document(fields: &Fields, created_at: DateTime<Utc>) -> GptDocument {
    GptDocument {
        schema_version: SCHEMA_VERSION.to_string(),
        name: fields.name.clone(),
        description: fields.description.clone(),
        instructions: fields.instructions.clone(),
        language: fields.language.clone(),
        persona: fields.persona,
        built_in_tools: fields.tools.enabled(),
        custom_actions: fields.actions.items().to_vec(),
        knowledge: Knowledge {
            enabled: fields.knowledge_enabled,
            documents: fields.documents.items().to_vec(),
        },
        memory: Memory {
            enabled: fields.memory_enabled,
            scope: fields.memory_scope,
            data_retention_days: coerce_retention_days(&fields.retention_days),
        },
        safety: Safety {
            jailbreak_defense: fields.jailbreak_defense,
            block_disallowed_content: fields.block_disallowed_content,
            pii_redaction: fields.pii_redaction,
            custom_disallowed_phrases: fields.disallowed_phrases.items().to_vec(),
        },
        conversation_starters: fields.starters.items().to_vec(),
        sample_questions: fields.sample_questions.items().to_vec(),
        tags: fields.tags.items().to_vec(),
        created_at,
    }
}

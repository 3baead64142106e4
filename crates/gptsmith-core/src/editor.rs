//! Editing session — applies edits to [`Fields`] and keeps the derived
//! [`GptDocument`] current.
//!
//! Every `apply` is followed by a full re-derivation; there is no
//! incremental cache to drift out of sync.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::schema::CreatedAtMode;
use crate::document::{
    BuiltInTool, EmojiFrequency, GptDocument, MemoryScope, ResponseLength, Tone,
};
use crate::fields::{derive_document, Fields};
use crate::list::{ActionDraft, StarterDraft};
use crate::utils::now_millis;

// ─────────────────────────────────────────────
// Edit
// ─────────────────────────────────────────────

/// Free-text scalar fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextField {
    Name,
    Description,
    Instructions,
    Language,
}

/// Safety switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SafetyFlag {
    JailbreakDefense,
    BlockDisallowedContent,
    PiiRedaction,
}

/// List fields whose items are plain strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextList {
    Documents,
    DisallowedPhrases,
    SampleQuestions,
    Tags,
}

/// Every list field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListField {
    Actions,
    Starters,
    Text(TextList),
}

/// A single change to the editing session.
#[derive(Clone, Debug, PartialEq)]
pub enum Edit {
    SetText(TextField, String),
    SetTone(Tone),
    SetEmojiFrequency(EmojiFrequency),
    SetResponseLength(ResponseLength),
    SetTool(BuiltInTool, bool),
    SetKnowledgeEnabled(bool),
    SetMemoryEnabled(bool),
    SetMemoryScope(MemoryScope),
    SetRetentionDays(String),
    SetSafety(SafetyFlag, bool),
    DraftAction(ActionDraft),
    DraftStarter(StarterDraft),
    DraftText(TextList, String),
    /// Commit the list's draft (silently ignored if the draft is invalid).
    Add(ListField),
    /// Remove by index (silently ignored if out of range).
    RemoveAt(ListField, usize),
}

/// What an edit did to the field state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// The edit was valid input but changed nothing (invalid draft, bad index).
    Unchanged,
}

// ─────────────────────────────────────────────
// Editor
// ─────────────────────────────────────────────

/// One editing session.
#[derive(Clone, Debug)]
pub struct Editor {
    fields: Fields,
    document: GptDocument,
    created_at_mode: CreatedAtMode,
    /// Stamp used in `Session` mode.
    session_stamp: DateTime<Utc>,
}

impl Editor {
    /// Start a session from default field values.
    pub fn new(created_at_mode: CreatedAtMode) -> Self {
        Self::with_fields(Fields::default(), created_at_mode, now_millis())
    }

    /// Start a session from a previously exported document.
    ///
    /// In `Session` mode the document's own `createdAt` is kept.
    pub fn from_document(doc: &GptDocument, created_at_mode: CreatedAtMode) -> Self {
        Self::with_fields(Fields::from_document(doc), created_at_mode, doc.created_at)
    }

    fn with_fields(fields: Fields, created_at_mode: CreatedAtMode, session_stamp: DateTime<Utc>) -> Self {
        let document = derive_document(&fields, session_stamp);
        Self {
            fields,
            document,
            created_at_mode,
            session_stamp,
        }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// The document derived after the most recent edit.
    pub fn document(&self) -> &GptDocument {
        &self.document
    }

    /// Re-derive and return the document for export.
    ///
    /// In `Derivation` mode this restamps `createdAt`; in `Session` mode it
    /// returns an identical document each time.
    pub fn snapshot(&mut self) -> &GptDocument {
        self.refresh();
        &self.document
    }

    /// Apply an edit and re-derive the document.
    pub fn apply(&mut self, edit: Edit) -> EditOutcome {
        debug!(?edit, "applying edit");
        let outcome = self.mutate(edit);
        self.refresh();
        outcome
    }

    fn refresh(&mut self) {
        let stamp = match self.created_at_mode {
            CreatedAtMode::Session => self.session_stamp,
            CreatedAtMode::Derivation => now_millis(),
        };
        self.document = derive_document(&self.fields, stamp);
    }

    fn mutate(&mut self, edit: Edit) -> EditOutcome {
        let f = &mut self.fields;
        match edit {
            Edit::SetText(field, value) => {
                let slot = match field {
                    TextField::Name => &mut f.name,
                    TextField::Description => &mut f.description,
                    TextField::Instructions => &mut f.instructions,
                    TextField::Language => &mut f.language,
                };
                *slot = value;
            }
            Edit::SetTone(tone) => f.persona.tone = tone,
            Edit::SetEmojiFrequency(freq) => f.persona.emoji_frequency = freq,
            Edit::SetResponseLength(len) => f.persona.response_length = len,
            Edit::SetTool(tool, on) => f.tools.set(tool, on),
            Edit::SetKnowledgeEnabled(on) => f.knowledge_enabled = on,
            Edit::SetMemoryEnabled(on) => f.memory_enabled = on,
            Edit::SetMemoryScope(scope) => f.memory_scope = scope,
            Edit::SetRetentionDays(text) => f.retention_days = text,
            Edit::SetSafety(flag, on) => match flag {
                SafetyFlag::JailbreakDefense => f.jailbreak_defense = on,
                SafetyFlag::BlockDisallowedContent => f.block_disallowed_content = on,
                SafetyFlag::PiiRedaction => f.pii_redaction = on,
            },
            Edit::DraftAction(draft) => f.actions.draft = draft,
            Edit::DraftStarter(draft) => f.starters.draft = draft,
            Edit::DraftText(list, text) => text_list_mut(f, list).draft = text,
            Edit::Add(list) => {
                let added = match list {
                    ListField::Actions => f.actions.add(),
                    ListField::Starters => f.starters.add(),
                    ListField::Text(list) => text_list_mut(f, list).add(),
                };
                return outcome(added);
            }
            Edit::RemoveAt(list, index) => {
                let removed = match list {
                    ListField::Actions => f.actions.remove_at(index).is_some(),
                    ListField::Starters => f.starters.remove_at(index).is_some(),
                    ListField::Text(list) => text_list_mut(f, list).remove_at(index).is_some(),
                };
                return outcome(removed);
            }
        }
        EditOutcome::Applied
    }
}

fn text_list_mut(fields: &mut Fields, list: TextList) -> &mut crate::list::ListEditor<String> {
    match list {
        TextList::Documents => &mut fields.documents,
        TextList::DisallowedPhrases => &mut fields.disallowed_phrases,
        TextList::SampleQuestions => &mut fields.sample_questions,
        TextList::Tags => &mut fields.tags,
    }
}

fn outcome(changed: bool) -> EditOutcome {
    if changed {
        EditOutcome::Applied
    } else {
        EditOutcome::Unchanged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ActionType;

    #[test]
    fn test_document_tracks_every_edit() {
        let mut editor = Editor::new(CreatedAtMode::Session);
        editor.apply(Edit::SetText(TextField::Name, "Chef".into()));
        assert_eq!(editor.document().name, "Chef");

        editor.apply(Edit::SetRetentionDays("abc".into()));
        assert_eq!(editor.document().memory.data_retention_days, 0);

        editor.apply(Edit::SetRetentionDays("90".into()));
        assert_eq!(editor.document().memory.data_retention_days, 90);

        editor.apply(Edit::SetSafety(SafetyFlag::PiiRedaction, true));
        assert!(editor.document().safety.pii_redaction);
    }

    #[test]
    fn test_add_then_remove_action() {
        let mut editor = Editor::new(CreatedAtMode::Session);
        editor.apply(Edit::DraftAction(ActionDraft::new("Lookup", ActionType::Openapi)));
        assert_eq!(editor.apply(Edit::Add(ListField::Actions)), EditOutcome::Applied);
        assert_eq!(editor.document().custom_actions.len(), 1);
        assert_eq!(editor.document().custom_actions[0].kind, ActionType::Openapi);

        assert_eq!(
            editor.apply(Edit::RemoveAt(ListField::Actions, 0)),
            EditOutcome::Applied
        );
        assert!(editor.document().custom_actions.is_empty());

        let raw = serde_json::to_value(editor.document()).unwrap();
        assert_eq!(raw["customActions"], serde_json::json!([]));
    }

    #[test]
    fn test_whitespace_add_unchanged_for_every_text_list() {
        for list in [
            TextList::Documents,
            TextList::DisallowedPhrases,
            TextList::SampleQuestions,
            TextList::Tags,
        ] {
            let mut editor = Editor::new(CreatedAtMode::Session);
            let before = editor.document().clone();
            editor.apply(Edit::DraftText(list, "   ".into()));
            assert_eq!(
                editor.apply(Edit::Add(ListField::Text(list))),
                EditOutcome::Unchanged
            );
            assert_eq!(editor.document(), &before);
        }
    }

    #[test]
    fn test_whitespace_starter_unchanged() {
        let mut editor = Editor::new(CreatedAtMode::Session);
        editor.apply(Edit::DraftStarter(StarterDraft {
            title: " ".into(),
            prompt: "Prompt".into(),
        }));
        assert_eq!(editor.apply(Edit::Add(ListField::Starters)), EditOutcome::Unchanged);
        assert!(editor.document().conversation_starters.is_empty());
    }

    #[test]
    fn test_remove_out_of_range_unchanged() {
        let mut editor = Editor::new(CreatedAtMode::Session);
        editor.apply(Edit::DraftText(TextList::Tags, "a".into()));
        editor.apply(Edit::Add(ListField::Text(TextList::Tags)));
        assert_eq!(
            editor.apply(Edit::RemoveAt(ListField::Text(TextList::Tags), 5)),
            EditOutcome::Unchanged
        );
        assert_eq!(editor.document().tags, vec!["a"]);
    }

    #[test]
    fn test_session_mode_keeps_created_at() {
        let mut editor = Editor::new(CreatedAtMode::Session);
        let first = editor.snapshot().created_at;
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = editor.snapshot().created_at;
        assert_eq!(first, second);
    }

    #[test]
    fn test_derivation_mode_restamps() {
        let mut editor = Editor::new(CreatedAtMode::Derivation);
        let first = editor.snapshot().created_at;
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = editor.snapshot().created_at;
        assert!(second > first);
    }

    #[test]
    fn test_from_document_keeps_stamp_in_session_mode() {
        let mut original = Editor::new(CreatedAtMode::Session);
        original.apply(Edit::SetText(TextField::Name, "Imported".into()));
        let doc = original.document().clone();

        let mut resumed = Editor::from_document(&doc, CreatedAtMode::Session);
        assert_eq!(resumed.snapshot(), &doc);
    }
}

//! Generic list editor — a committed list plus the draft being composed.
//!
//! Every list-typed field (actions, documents, phrases, starters, questions,
//! tags) is a `ListEditor<T>`. The item type decides what its draft looks
//! like and when a draft is good enough to commit.

use std::fmt;

use crate::document::{ActionAuth, ActionType, AuthType, ConversationStarter, CustomAction};

/// An item that can be committed from a draft.
pub trait ListItem: Clone + fmt::Debug + PartialEq {
    /// Scratch value edited before committing.
    type Draft: Default + Clone + fmt::Debug + PartialEq;

    /// Validate and normalize a draft. `None` means the draft is not ready.
    fn from_draft(draft: &Self::Draft) -> Option<Self>;
}

/// Committed items plus the current draft.
#[derive(Clone, Debug, PartialEq)]
pub struct ListEditor<T: ListItem> {
    items: Vec<T>,
    /// Current draft (public so callers can bind inputs to it directly).
    pub draft: T::Draft,
}

impl<T: ListItem> Default for ListEditor<T> {
    fn default() -> Self {
        Self::with_items(Vec::new())
    }
}

impl<T: ListItem> ListEditor<T> {
    /// Create an editor pre-filled with committed items and an empty draft.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items,
            draft: T::Draft::default(),
        }
    }

    /// Committed items, in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Commit the draft to the end of the list and clear it.
    ///
    /// An invalid draft is left untouched and nothing is appended.
    /// Returns whether an item was appended.
    pub fn add(&mut self) -> bool {
        match T::from_draft(&self.draft) {
            Some(item) => {
                self.items.push(item);
                self.draft = T::Draft::default();
                true
            }
            None => false,
        }
    }

    /// Remove the item at `index`, shifting later items left.
    ///
    /// Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }
}

/// Trim a string, returning `None` if nothing is left.
fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ─────────────────────────────────────────────
// Item impls
// ─────────────────────────────────────────────

impl ListItem for String {
    type Draft = String;

    fn from_draft(draft: &String) -> Option<Self> {
        non_blank(draft)
    }
}

/// Draft of a conversation starter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StarterDraft {
    pub title: String,
    pub prompt: String,
}

impl ListItem for ConversationStarter {
    type Draft = StarterDraft;

    fn from_draft(draft: &StarterDraft) -> Option<Self> {
        Some(ConversationStarter {
            title: non_blank(&draft.title)?,
            prompt: non_blank(&draft.prompt)?,
        })
    }
}

/// Draft of a custom action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionDraft {
    pub name: String,
    pub kind: ActionType,
    pub spec_url_or_inline: String,
    pub auth: AuthType,
    pub auth_instructions: String,
}

impl ActionDraft {
    pub fn new(name: impl Into<String>, kind: ActionType) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }
}

impl ListItem for CustomAction {
    type Draft = ActionDraft;

    /// Only the name is required. Auth is emitted only when a scheme other
    /// than `none` is selected.
    fn from_draft(draft: &ActionDraft) -> Option<Self> {
        let name = non_blank(&draft.name)?;
        let auth = match draft.auth {
            AuthType::None => None,
            kind => Some(ActionAuth {
                kind,
                instructions: non_blank(&draft.auth_instructions),
            }),
        };
        Some(CustomAction {
            name,
            kind: draft.kind,
            spec_url_or_inline: non_blank(&draft.spec_url_or_inline),
            auth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> ListEditor<String> {
        ListEditor::with_items(values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_add_trims_and_clears_draft() {
        let mut list: ListEditor<String> = ListEditor::default();
        list.draft = "  rust  ".into();
        assert!(list.add());
        assert_eq!(list.items(), ["rust".to_string()]);
        assert!(list.draft.is_empty());
    }

    #[test]
    fn test_add_whitespace_is_noop() {
        let mut list = tags(&["a"]);
        list.draft = " \t\n ".into();
        assert!(!list.add());
        assert_eq!(list.items(), ["a".to_string()]);
        // Draft is kept as typed
        assert_eq!(list.draft, " \t\n ");
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut list: ListEditor<String> = ListEditor::default();
        for value in ["one", "two", "three"] {
            list.draft = value.into();
            list.add();
        }
        assert_eq!(list.items(), ["one", "two", "three"].map(String::from));
    }

    #[test]
    fn test_remove_at_shifts_left() {
        let mut list = tags(&["a", "b", "c", "d"]);
        assert_eq!(list.remove_at(1).as_deref(), Some("b"));
        assert_eq!(list.items(), ["a", "c", "d"].map(String::from));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_remove_at_out_of_range_is_noop() {
        let mut list = tags(&["a", "b"]);
        assert!(list.remove_at(2).is_none());
        assert!(list.remove_at(usize::MAX).is_none());
        assert_eq!(list.len(), 2);

        let mut empty: ListEditor<String> = ListEditor::default();
        assert!(empty.remove_at(0).is_none());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_starter_requires_title_and_prompt() {
        let mut list: ListEditor<ConversationStarter> = ListEditor::default();
        list.draft = StarterDraft {
            title: "Plan".into(),
            prompt: "   ".into(),
        };
        assert!(!list.add());
        assert!(list.is_empty());

        list.draft.prompt = " Plan my week ".into();
        assert!(list.add());
        assert_eq!(
            list.items()[0],
            ConversationStarter {
                title: "Plan".into(),
                prompt: "Plan my week".into(),
            }
        );
        assert_eq!(list.draft, StarterDraft::default());
    }

    #[test]
    fn test_action_requires_name() {
        let mut list: ListEditor<CustomAction> = ListEditor::default();
        list.draft = ActionDraft::new("  ", ActionType::Openapi);
        assert!(!list.add());
        assert!(list.is_empty());
    }

    #[test]
    fn test_action_optional_fields() {
        let mut list: ListEditor<CustomAction> = ListEditor::default();
        list.draft = ActionDraft {
            name: " Lookup ".into(),
            kind: ActionType::Openapi,
            spec_url_or_inline: "  ".into(),
            auth: AuthType::Oauth,
            auth_instructions: " use the team app ".into(),
        };
        assert!(list.add());

        let action = &list.items()[0];
        assert_eq!(action.name, "Lookup");
        assert!(action.spec_url_or_inline.is_none());
        let auth = action.auth.as_ref().unwrap();
        assert_eq!(auth.kind, AuthType::Oauth);
        assert_eq!(auth.instructions.as_deref(), Some("use the team app"));
    }

    #[test]
    fn test_action_auth_none_omitted() {
        let mut list: ListEditor<CustomAction> = ListEditor::default();
        list.draft = ActionDraft {
            auth_instructions: "ignored".into(),
            ..ActionDraft::new("Lookup", ActionType::Function)
        };
        list.add();
        assert!(list.items()[0].auth.is_none());
    }
}

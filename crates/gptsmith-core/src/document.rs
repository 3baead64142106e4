//! Output document — the exported Custom GPT definition.
//!
//! All types derive `Serialize`/`Deserialize` with `camelCase` keys so the
//! JSON matches what GPT builders expect. Optional keys are omitted when
//! absent rather than emitted as `null`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ChoiceError;

/// Version tag written into every exported document.
pub const SCHEMA_VERSION: &str = "1.0";

// ─────────────────────────────────────────────
// Choice enums
// ─────────────────────────────────────────────

/// A closed set of string-named options that can be parsed from user input.
pub trait Choice: Sized + Copy + 'static {
    /// Human-readable name of the option set (used in error messages).
    const KIND: &'static str;
    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// Wire name of this variant (identical to its serde representation).
    fn as_str(&self) -> &'static str;

    /// Parse a wire name, case-insensitively.
    fn parse_choice(input: &str) -> Result<Self, ChoiceError> {
        let wanted = input.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ChoiceError {
                kind: Self::KIND,
                input: wanted.to_string(),
                expected: Self::ALL
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Implements `Display` and `FromStr` for a `Choice` via its wire names.
macro_rules! choice_str_impls {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = ChoiceError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    Self::parse_choice(s)
                }
            }
        )+
    };
}

/// Conversational tone of the assistant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    #[default]
    Friendly,
    Professional,
    Playful,
}

impl Choice for Tone {
    const KIND: &'static str = "tone";
    const ALL: &'static [Self] = &[Self::Neutral, Self::Friendly, Self::Professional, Self::Playful];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Friendly => "friendly",
            Self::Professional => "professional",
            Self::Playful => "playful",
        }
    }
}

/// How often the assistant may use emoji.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiFrequency {
    None,
    #[default]
    Low,
    Medium,
    High,
}

impl Choice for EmojiFrequency {
    const KIND: &'static str = "emoji frequency";
    const ALL: &'static [Self] = &[Self::None, Self::Low, Self::Medium, Self::High];

    fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Preferred answer length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl Choice for ResponseLength {
    const KIND: &'static str = "response length";
    const ALL: &'static [Self] = &[Self::Short, Self::Medium, Self::Long];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

/// Platform capability that can be toggled on or off.
///
/// Variant order is the canonical order of `builtInTools` in the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltInTool {
    Web,
    Code,
    Retrieval,
    Image,
    Vision,
}

impl Choice for BuiltInTool {
    const KIND: &'static str = "built-in tool";
    const ALL: &'static [Self] = &[Self::Web, Self::Code, Self::Retrieval, Self::Image, Self::Vision];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Code => "code",
            Self::Retrieval => "retrieval",
            Self::Image => "image",
            Self::Vision => "vision",
        }
    }
}

/// How a custom action describes its API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    #[default]
    Openapi,
    Function,
    Webhook,
    Graphql,
}

impl Choice for ActionType {
    const KIND: &'static str = "action type";
    const ALL: &'static [Self] = &[Self::Openapi, Self::Function, Self::Webhook, Self::Graphql];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Openapi => "openapi",
            Self::Function => "function",
            Self::Webhook => "webhook",
            Self::Graphql => "graphql",
        }
    }
}

/// Authentication scheme of a custom action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthType {
    #[default]
    None,
    ApiKey,
    Oauth,
}

impl Choice for AuthType {
    const KIND: &'static str = "auth type";
    const ALL: &'static [Self] = &[Self::None, Self::ApiKey, Self::Oauth];

    fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ApiKey => "apiKey",
            Self::Oauth => "oauth",
        }
    }
}

/// Lifetime of remembered facts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryScope {
    #[default]
    Session,
    User,
    Global,
}

impl Choice for MemoryScope {
    const KIND: &'static str = "memory scope";
    const ALL: &'static [Self] = &[Self::Session, Self::User, Self::Global];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::User => "user",
            Self::Global => "global",
        }
    }
}

choice_str_impls!(
    Tone,
    EmojiFrequency,
    ResponseLength,
    BuiltInTool,
    ActionType,
    AuthType,
    MemoryScope,
);

// ─────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────

/// Persona settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub tone: Tone,
    pub emoji_frequency: EmojiFrequency,
    pub response_length: ResponseLength,
}

/// Authentication block of a custom action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionAuth {
    #[serde(rename = "type")]
    pub kind: AuthType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// A user-defined external API integration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomAction {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ActionType,
    /// OpenAPI spec URL or an inline schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_url_or_inline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<ActionAuth>,
}

/// Uploaded knowledge documents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Knowledge {
    pub enabled: bool,
    #[serde(default)]
    pub documents: Vec<String>,
}

/// Long-term memory settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub enabled: bool,
    pub scope: MemoryScope,
    pub data_retention_days: u32,
}

/// Safety guard rails.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Safety {
    pub jailbreak_defense: bool,
    pub block_disallowed_content: bool,
    pub pii_redaction: bool,
    #[serde(default)]
    pub custom_disallowed_phrases: Vec<String>,
}

/// Suggested opening message shown to end users.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationStarter {
    pub title: String,
    pub prompt: String,
}

// ─────────────────────────────────────────────
// GptDocument
// ─────────────────────────────────────────────

/// The complete exported configuration.
///
/// Never edited directly: it is always derived from
/// [`Fields`](crate::fields::Fields) by [`derive_document`](crate::fields::derive_document).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GptDocument {
    pub schema_version: String,
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub language: String,
    pub persona: Persona,
    pub built_in_tools: Vec<BuiltInTool>,
    pub custom_actions: Vec<CustomAction>,
    pub knowledge: Knowledge,
    pub memory: Memory,
    pub safety: Safety,
    pub conversation_starters: Vec<ConversationStarter>,
    pub sample_questions: Vec<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl GptDocument {
    /// Parse a document from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_parse_case_insensitive() {
        assert_eq!(Tone::parse_choice("Professional").unwrap(), Tone::Professional);
        assert_eq!(AuthType::parse_choice("apikey").unwrap(), AuthType::ApiKey);
        assert_eq!(" vision ".parse::<BuiltInTool>().unwrap(), BuiltInTool::Vision);
    }

    #[test]
    fn test_choice_parse_unknown_lists_options() {
        let err = MemoryScope::parse_choice("forever").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("forever"));
        assert!(msg.contains("session, user, global"));
    }

    #[test]
    fn test_as_str_matches_serde() {
        for tool in BuiltInTool::ALL {
            let json = serde_json::to_string(tool).unwrap();
            assert_eq!(json, format!("\"{}\"", tool.as_str()));
        }
        for auth in AuthType::ALL {
            let json = serde_json::to_string(auth).unwrap();
            assert_eq!(json, format!("\"{}\"", auth.as_str()));
        }
    }

    #[test]
    fn test_tool_canonical_order() {
        let mut tools = vec![BuiltInTool::Vision, BuiltInTool::Web, BuiltInTool::Image];
        tools.sort();
        assert_eq!(tools, vec![BuiltInTool::Web, BuiltInTool::Image, BuiltInTool::Vision]);
    }

    #[test]
    fn test_action_optional_keys_omitted() {
        let action = CustomAction {
            name: "Lookup".into(),
            kind: ActionType::Openapi,
            spec_url_or_inline: None,
            auth: None,
        };
        let raw = serde_json::to_value(&action).unwrap();
        assert_eq!(raw, serde_json::json!({ "name": "Lookup", "type": "openapi" }));
    }

    #[test]
    fn test_action_with_auth() {
        let action = CustomAction {
            name: "Weather".into(),
            kind: ActionType::Webhook,
            spec_url_or_inline: Some("https://example.com/hook".into()),
            auth: Some(ActionAuth {
                kind: AuthType::ApiKey,
                instructions: None,
            }),
        };
        let raw = serde_json::to_value(&action).unwrap();
        assert_eq!(raw["specUrlOrInline"], "https://example.com/hook");
        assert_eq!(raw["auth"], serde_json::json!({ "type": "apiKey" }));
    }
}

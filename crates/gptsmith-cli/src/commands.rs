//! REPL command grammar — turns one input line into editor edits or an
//! export action.

use std::path::PathBuf;

use thiserror::Error;

use gptsmith_core::document::{
    ActionType, AuthType, BuiltInTool, Choice, EmojiFrequency, MemoryScope, ResponseLength, Tone,
};
use gptsmith_core::editor::{ListField, SafetyFlag, TextField, TextList};
use gptsmith_core::list::{ActionDraft, StarterDraft};
use gptsmith_core::{ChoiceError, Edit};

/// Help text printed by `help`.
pub const HELP: &str = "\
Fields
  set <name|description|instructions|language> <text>
  persona <tone|emoji|length> <choice>
  tool <web|code|retrieval|image|vision> <on|off>
  knowledge <on|off>
  memory <on|off> | memory scope <session|user|global> | memory retention <days>
  safety <jailbreak|block|pii> <on|off>

Lists (indices start at 0)
  doc add <text>        doc rm <index>
  phrase add <text>     phrase rm <index>
  question add <text>   question rm <index>
  tag add <text>        tag rm <index>
  starter add <title> | <prompt>
  starter rm <index>
  action add <name> [| <type> [| <spec url or inline> [| <auth> [| <auth instructions>]]]]
  action rm <index>

Output
  show                  print the current document
  lint                  list probable mistakes
  copy                  copy the document JSON to the clipboard
  save [path]           write the document to a .json file
  help                  show this text
  exit                  leave the editor";

/// A parsed REPL line.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Edits applied in order (e.g. set a draft, then commit it).
    Edits(Vec<Edit>),
    Show,
    Lint,
    Copy,
    Save(Option<PathBuf>),
    Help,
    Exit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type `help` for the list)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a list index")]
    BadIndex(String),

    #[error("'{0}' is not on/off")]
    BadSwitch(String),

    #[error(transparent)]
    Choice(#[from] ChoiceError),
}

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// Parse one non-empty input line.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let (head, rest) = split_word(line.trim());
    let head = head.to_lowercase();

    if EXIT_COMMANDS.contains(&head.as_str()) {
        return Ok(Command::Exit);
    }

    match head.as_str() {
        "show" => Ok(Command::Show),
        "lint" => Ok(Command::Lint),
        "copy" => Ok(Command::Copy),
        "save" => Ok(Command::Save((!rest.is_empty()).then(|| PathBuf::from(rest)))),
        "help" | "?" => Ok(Command::Help),
        "set" => parse_set(rest),
        "persona" => parse_persona(rest),
        "tool" => {
            let (tool, state) = split_word(rest);
            if tool.is_empty() {
                return Err(CommandError::Usage("tool <name> <on|off>"));
            }
            Ok(single(Edit::SetTool(BuiltInTool::parse_choice(tool)?, parse_switch(state)?)))
        }
        "knowledge" => Ok(single(Edit::SetKnowledgeEnabled(parse_switch(rest)?))),
        "memory" => parse_memory(rest),
        "safety" => parse_safety(rest),
        "doc" => parse_text_list(TextList::Documents, rest, "doc <add <text>|rm <index>>"),
        "phrase" => parse_text_list(
            TextList::DisallowedPhrases,
            rest,
            "phrase <add <text>|rm <index>>",
        ),
        "question" => parse_text_list(
            TextList::SampleQuestions,
            rest,
            "question <add <text>|rm <index>>",
        ),
        "tag" => parse_text_list(TextList::Tags, rest, "tag <add <text>|rm <index>>"),
        "starter" => parse_starter(rest),
        "action" => parse_action(rest),
        _ => Err(CommandError::Unknown(head.clone())),
    }
}

// ─────────────────────────────────────────────
// Sub-grammars
// ─────────────────────────────────────────────

fn parse_set(rest: &str) -> Result<Command, CommandError> {
    const USAGE: &str = "set <name|description|instructions|language> <text>";
    let (field, value) = split_word(rest);
    let field = match field.to_lowercase().as_str() {
        "name" => TextField::Name,
        "description" => TextField::Description,
        "instructions" => TextField::Instructions,
        "language" => TextField::Language,
        _ => return Err(CommandError::Usage(USAGE)),
    };
    Ok(single(Edit::SetText(field, value.to_string())))
}

fn parse_persona(rest: &str) -> Result<Command, CommandError> {
    let (aspect, value) = split_word(rest);
    let edit = match aspect.to_lowercase().as_str() {
        "tone" => Edit::SetTone(Tone::parse_choice(value)?),
        "emoji" => Edit::SetEmojiFrequency(EmojiFrequency::parse_choice(value)?),
        "length" => Edit::SetResponseLength(ResponseLength::parse_choice(value)?),
        _ => return Err(CommandError::Usage("persona <tone|emoji|length> <choice>")),
    };
    Ok(single(edit))
}

fn parse_memory(rest: &str) -> Result<Command, CommandError> {
    let (sub, value) = split_word(rest);
    let edit = match sub.to_lowercase().as_str() {
        "scope" => Edit::SetMemoryScope(MemoryScope::parse_choice(value)?),
        "retention" => Edit::SetRetentionDays(value.to_string()),
        "" => {
            return Err(CommandError::Usage(
                "memory <on|off> | memory scope <scope> | memory retention <days>",
            ))
        }
        _ => Edit::SetMemoryEnabled(parse_switch(rest)?),
    };
    Ok(single(edit))
}

fn parse_safety(rest: &str) -> Result<Command, CommandError> {
    let (flag, state) = split_word(rest);
    let flag = match flag.to_lowercase().as_str() {
        "jailbreak" => SafetyFlag::JailbreakDefense,
        "block" => SafetyFlag::BlockDisallowedContent,
        "pii" => SafetyFlag::PiiRedaction,
        _ => return Err(CommandError::Usage("safety <jailbreak|block|pii> <on|off>")),
    };
    Ok(single(Edit::SetSafety(flag, parse_switch(state)?)))
}

fn parse_text_list(list: TextList, rest: &str, usage: &'static str) -> Result<Command, CommandError> {
    let (verb, value) = split_word(rest);
    match verb.to_lowercase().as_str() {
        "add" => Ok(Command::Edits(vec![
            Edit::DraftText(list, value.to_string()),
            Edit::Add(ListField::Text(list)),
        ])),
        "rm" => Ok(single(Edit::RemoveAt(ListField::Text(list), parse_index(value)?))),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn parse_starter(rest: &str) -> Result<Command, CommandError> {
    const USAGE: &str = "starter <add <title> | <prompt>|rm <index>>";
    let (verb, value) = split_word(rest);
    match verb.to_lowercase().as_str() {
        "add" => {
            let (title, prompt) = value.split_once('|').unwrap_or((value, ""));
            Ok(Command::Edits(vec![
                Edit::DraftStarter(StarterDraft {
                    title: title.to_string(),
                    prompt: prompt.to_string(),
                }),
                Edit::Add(ListField::Starters),
            ]))
        }
        "rm" => Ok(single(Edit::RemoveAt(ListField::Starters, parse_index(value)?))),
        _ => Err(CommandError::Usage(USAGE)),
    }
}

fn parse_action(rest: &str) -> Result<Command, CommandError> {
    const USAGE: &str = "action <add <name> [| type | spec | auth | instructions]|rm <index>>";
    let (verb, value) = split_word(rest);
    match verb.to_lowercase().as_str() {
        "add" => {
            let mut parts = value.splitn(5, '|').map(str::trim);
            let name = parts.next().unwrap_or_default().to_string();
            let kind = match parts.next().filter(|s| !s.is_empty()) {
                Some(s) => ActionType::parse_choice(s)?,
                None => ActionType::default(),
            };
            let spec_url_or_inline = parts.next().unwrap_or_default().to_string();
            let auth = match parts.next().filter(|s| !s.is_empty()) {
                Some(s) => AuthType::parse_choice(s)?,
                None => AuthType::default(),
            };
            let auth_instructions = parts.next().unwrap_or_default().to_string();
            Ok(Command::Edits(vec![
                Edit::DraftAction(ActionDraft {
                    name,
                    kind,
                    spec_url_or_inline,
                    auth,
                    auth_instructions,
                }),
                Edit::Add(ListField::Actions),
            ]))
        }
        "rm" => Ok(single(Edit::RemoveAt(ListField::Actions, parse_index(value)?))),
        _ => Err(CommandError::Usage(USAGE)),
    }
}

// ─────────────────────────────────────────────
// Tokens
// ─────────────────────────────────────────────

fn single(edit: Edit) -> Command {
    Command::Edits(vec![edit])
}

/// Split off the first whitespace-delimited word; the rest keeps its inner
/// spacing but loses leading whitespace.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(pos) => (&input[..pos], input[pos..].trim_start()),
        None => (input, ""),
    }
}

fn parse_switch(input: &str) -> Result<bool, CommandError> {
    match input.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(CommandError::BadSwitch(input.trim().to_string())),
    }
}

fn parse_index(input: &str) -> Result<usize, CommandError> {
    input
        .trim()
        .parse()
        .map_err(|_| CommandError::BadIndex(input.trim().to_string()))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

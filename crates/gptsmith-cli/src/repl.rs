//! Interactive editor REPL.
//!
//! Uses `rustyline` for readline-style editing with persistent history.
//! Each line is parsed into a [`Command`]; edits go to the [`Editor`],
//! which re-derives the document before the next prompt.
//!
//! After `copy`, a "copied" status line stays above the prompt until the
//! configured signal duration passes, then a timer task erases it through
//! rustyline's external printer, even while `readline` is waiting.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::history::DefaultHistory;
use rustyline::{DefaultEditor, Editor as LineEditor, ExternalPrinter};
use tokio::task::JoinHandle;
use tracing::debug;

use gptsmith_core::config::EditorConfig;
use gptsmith_core::export::{self, Clipboard, Flash, SystemClipboard};
use gptsmith_core::lint::lint;
use gptsmith_core::utils::{expand_home, get_history_path};
use gptsmith_core::{EditOutcome, Editor};

use crate::commands::{self, Command, HELP};
use crate::helpers;

const PROMPT: &str = "gptsmith> ";

/// Status line shown while the copy signal is up.
const COPIED: &str = "copied to clipboard";

/// Whether the loop should keep reading.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One interactive editing session.
pub struct Session {
    editor: Editor,
    clipboard: Box<dyn Clipboard>,
    flash: Flash,
    output_dir: PathBuf,
    default_stem: String,
}

impl Session {
    /// Build a session using the system clipboard from `config`.
    pub fn new(editor: Editor, config: &EditorConfig) -> Self {
        let clipboard = SystemClipboard::new(config.clipboard.command.as_deref());
        Self::with_clipboard(editor, config, Box::new(clipboard))
    }

    pub fn with_clipboard(editor: Editor, config: &EditorConfig, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            editor,
            clipboard,
            flash: Flash::new(Duration::from_millis(config.clipboard.flash_ms)),
            output_dir: expand_home(&config.export.output_dir),
            default_stem: config.export.default_stem.clone(),
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// How much longer the copy signal stays up at `now`; `None` once cleared.
    pub fn copy_signal(&mut self, now: Instant) -> Option<Duration> {
        self.flash.remaining(now)
    }

    /// Run one parsed command.
    pub async fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Edits(edits) => {
                let mut last = EditOutcome::Applied;
                for edit in edits {
                    last = self.editor.apply(edit);
                }
                if last == EditOutcome::Unchanged {
                    helpers::print_unchanged("nothing changed (empty draft or no such index)");
                }
            }
            Command::Show => {
                let json = export::to_json(self.editor.snapshot())?;
                helpers::print_document(&json);
            }
            Command::Lint => helpers::print_warnings(&lint(self.editor.document())),
            Command::Copy => {
                export::copy_to_clipboard(self.editor.snapshot(), self.clipboard.as_ref()).await?;
                self.flash.trigger(Instant::now());
                helpers::print_ok(COPIED);
            }
            Command::Save(path) => {
                let doc = self.editor.snapshot();
                let written = match path {
                    Some(path) => {
                        let path = expand_home(&path.to_string_lossy());
                        export::save_to_path(doc, &path)?;
                        path
                    }
                    None => export::save_to_dir(doc, &self.output_dir, &self.default_stem)?,
                };
                helpers::print_ok(&format!("saved {}", written.display()));
            }
            Command::Help => println!("{HELP}"),
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }
}

/// Run the interactive REPL loop.
pub async fn run(mut session: Session) -> Result<()> {
    helpers::print_banner();

    let mut line_editor = create_line_editor()?;
    let mut signal_clear: Option<JoinHandle<()>> = None;

    loop {
        let read = line_editor.readline(PROMPT);
        // Once a line is submitted the status line is no longer right above
        // the prompt, so it must not be erased.
        if let Some(task) = signal_clear.take() {
            task.abort();
        }
        let input = match read {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                // Ctrl-C — exit cleanly
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                // Ctrl-D — exit cleanly
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        let _ = line_editor.add_history_entry(&input);

        let command = match commands::parse(trimmed) {
            Ok(command) => command,
            Err(e) => {
                helpers::print_error(&e);
                continue;
            }
        };

        debug!(input = trimmed, "executing command");
        let copying = command == Command::Copy;
        match session.execute(command).await {
            Ok(Flow::Continue) => {
                // Only a fresh copy leaves its status line right above the prompt.
                if copying {
                    if let Some(left) = session.copy_signal(Instant::now()) {
                        signal_clear = schedule_signal_clear(&mut line_editor, left);
                    }
                }
            }
            Ok(Flow::Exit) => {
                println!("\nGoodbye! 👋");
                break;
            }
            Err(e) => helpers::print_error(&e),
        }
    }

    save_history(&mut line_editor);

    Ok(())
}

/// Erase the copy status line once `after` has passed.
fn schedule_signal_clear(
    line_editor: &mut LineEditor<(), DefaultHistory>,
    after: Duration,
) -> Option<JoinHandle<()>> {
    let mut printer = match line_editor.create_external_printer() {
        Ok(printer) => printer,
        Err(e) => {
            debug!("copy signal will not auto-clear: {e}");
            return None;
        }
    };
    Some(tokio::spawn(async move {
        tokio::time::sleep(after).await;
        if let Err(e) = printer.print(helpers::ERASE_LINE_ABOVE.to_string()) {
            debug!("failed to clear copy signal: {e}");
        }
    }))
}

/// Create a rustyline editor with history.
fn create_line_editor() -> Result<LineEditor<(), DefaultHistory>> {
    let mut editor = DefaultEditor::new()?;
    editor.set_max_history_size(1000)?;

    let history_path = history_path();
    if history_path.exists() {
        let _ = editor.load_history(&history_path);
        debug!("loaded REPL history from {}", history_path.display());
    }

    Ok(editor)
}

/// Save history to disk.
fn save_history(editor: &mut LineEditor<(), DefaultHistory>) {
    let path = history_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.save_history(&path) {
        debug!("failed to save history: {e}");
    }
}

/// Path to the history file.
fn history_path() -> PathBuf {
    get_history_path().join("repl_history")
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use gptsmith_core::config::CreatedAtMode;
    use gptsmith_core::document::BuiltInTool;
    use gptsmith_core::ExportError;

    use super::*;

    /// Clipboard that records every write into shared memory.
    struct SharedClipboard(Arc<Mutex<Vec<String>>>);

    #[async_trait]
    impl Clipboard for SharedClipboard {
        async fn write_text(&self, text: &str) -> Result<(), ExportError> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }

        fn name(&self) -> &str {
            "shared"
        }
    }

    fn session_in(dir: &std::path::Path) -> (Session, Arc<Mutex<Vec<String>>>) {
        let mut config = EditorConfig::default();
        config.export.output_dir = dir.to_string_lossy().into_owned();
        let copies = Arc::new(Mutex::new(Vec::new()));
        let session = Session::with_clipboard(
            Editor::new(CreatedAtMode::Session),
            &config,
            Box::new(SharedClipboard(copies.clone())),
        );
        (session, copies)
    }

    async fn run_line(session: &mut Session, line: &str) -> Flow {
        session.execute(commands::parse(line).unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn edits_flow_into_document() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, _) = session_in(dir.path());

        run_line(&mut session, "tool code on").await;
        run_line(&mut session, "tool vision on").await;
        run_line(&mut session, "action add Lookup | openapi").await;
        run_line(&mut session, "tag add   ").await;

        let doc = session.editor().document();
        assert_eq!(
            doc.built_in_tools,
            vec![BuiltInTool::Web, BuiltInTool::Code, BuiltInTool::Vision]
        );
        assert_eq!(doc.custom_actions.len(), 1);
        assert!(doc.tags.is_empty());

        run_line(&mut session, "action rm 0").await;
        assert!(session.editor().document().custom_actions.is_empty());
    }

    #[tokio::test]
    async fn copy_raises_signal_and_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, copies) = session_in(dir.path());

        assert_eq!(session.copy_signal(Instant::now()), None);
        run_line(&mut session, "set name Copier").await;
        run_line(&mut session, "copy").await;

        let left = session.copy_signal(Instant::now()).unwrap();
        assert!(left <= Duration::from_millis(1200));
        let copies = copies.lock().unwrap();
        assert_eq!(copies.len(), 1);
        assert!(copies[0].contains("\"name\": \"Copier\""));
    }

    #[tokio::test]
    async fn copy_signal_clears_after_duration_without_input() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, _) = session_in(dir.path());

        run_line(&mut session, "copy").await;
        let copied_at = Instant::now();
        assert!(session.copy_signal(copied_at).is_some());

        // No further commands: only time passes.
        assert_eq!(session.copy_signal(copied_at + Duration::from_millis(1200)), None);
        assert_eq!(session.copy_signal(copied_at), None);
    }

    #[tokio::test]
    async fn failed_copy_raises_no_signal() {
        struct BrokenClipboard;

        #[async_trait]
        impl Clipboard for BrokenClipboard {
            async fn write_text(&self, _text: &str) -> Result<(), ExportError> {
                Err(ExportError::Clipboard("no display".into()))
            }

            fn name(&self) -> &str {
                "broken"
            }
        }

        let mut session = Session::with_clipboard(
            Editor::new(CreatedAtMode::Session),
            &EditorConfig::default(),
            Box::new(BrokenClipboard),
        );
        assert!(session.execute(Command::Copy).await.is_err());
        assert_eq!(session.copy_signal(Instant::now()), None);
    }

    #[tokio::test]
    async fn save_uses_output_dir_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, _) = session_in(dir.path());

        run_line(&mut session, "save").await;
        assert!(dir.path().join("custom-gpt.json").exists());

        run_line(&mut session, "set name Trip Planner").await;
        run_line(&mut session, "save").await;
        assert!(dir.path().join("Trip Planner.json").exists());

        let explicit = dir.path().join("sub").join("explicit.json");
        run_line(&mut session, &format!("save {}", explicit.display())).await;
        assert!(explicit.exists());
    }

    #[tokio::test]
    async fn exit_stops_loop() {
        let dir = tempfile::tempdir().unwrap();
        let (mut session, _) = session_in(dir.path());
        assert_eq!(run_line(&mut session, "quit").await, Flow::Exit);
        assert_eq!(run_line(&mut session, "show").await, Flow::Continue);
    }

    #[test]
    fn history_path_under_data_dir() {
        let path = history_path();
        assert!(path.to_string_lossy().contains(".gptsmith"));
        assert!(path.to_string_lossy().contains("repl_history"));
    }
}

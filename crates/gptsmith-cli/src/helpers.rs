//! Shared CLI helpers — banner, document printing, lint output.

use colored::Colorize;

use gptsmith_core::lint::LintWarning;

/// Move the cursor up one row and clear it. Fed to rustyline's external
/// printer, which clears the prompt first and redraws it afterwards, so this
/// removes the status line printed just above the prompt.
pub const ERASE_LINE_ABOVE: &str = "\x1b[1A\x1b[2K";

/// Print the banner shown at REPL start.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "⚒ GPT Smith".cyan().bold(), version.dimmed());
    println!(
        "{}",
        "Type `help` for commands, `show` to see the document, or \"exit\" to quit.".dimmed()
    );
    println!();
}

/// Print the document JSON.
pub fn print_document(json: &str) {
    println!();
    println!("{json}");
    println!();
}

/// Print lint warnings (or a clean bill of health).
pub fn print_warnings(warnings: &[LintWarning]) {
    if warnings.is_empty() {
        println!("  {} no problems found", "✓".green());
        return;
    }
    for warning in warnings {
        println!("  {} {}", "!".yellow().bold(), warning);
    }
}

/// Print a one-line success note.
pub fn print_ok(message: &str) {
    println!("  {} {}", "✓".green(), message);
}

/// Print a dimmed note for edits that changed nothing.
pub fn print_unchanged(message: &str) {
    println!("  {}", format!("· {message}").dimmed());
}

/// Print a recoverable error without leaving the REPL.
pub fn print_error(err: &dyn std::fmt::Display) {
    eprintln!("  {} {err}", "✗".red());
}

//! Pure formatting functions for UI output.
//!
//! All operator-facing messages go through here so styling stays in one
//! place. Colors are dropped automatically when the stream is not a terminal.

use console::style;

use crate::outcome::StepWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a non-fatal step warning.
pub fn display_warning(warning: &StepWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print guidance for the operator when an operation was not started.
pub fn display_advisory(message: &str) {
    println!("{} {}", style("!").cyan().bold(), message);
}

/// Print a command line that a dry run would have executed.
pub fn display_dry_run(command_line: &str) {
    println!("{} {}", style("[dry-run]").dim(), style(command_line).cyan());
}

/// Render the prompt text shown before reading a line.
///
/// The default, when present, is shown in brackets:
/// `Commit message [No message]: `.
pub fn format_prompt(message: &str, default: Option<&str>) -> String {
    let message = message.trim_end().trim_end_matches(':');
    match default {
        Some(default) => format!("{} [{}]: ", message, default),
        None => format!("{}: ", message),
    }
}

//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - The [Prompter] seam and its implementations

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use crate::error::{Result, ShortcutError};

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_advisory, display_dry_run, display_error, display_status, display_success,
    display_warning, format_prompt,
};

/// Source of operator text input.
///
/// Implementations return the entered line exactly as typed, minus its line
/// terminator. A blank line resolves to `default` (or an empty string when
/// there is none).
pub trait Prompter {
    fn prompt(&self, message: &str, default: Option<&str>) -> Result<String>;
}

impl<T: Prompter + ?Sized> Prompter for &T {
    fn prompt(&self, message: &str, default: Option<&str>) -> Result<String> {
        (**self).prompt(message, default)
    }
}

impl<T: Prompter + ?Sized> Prompter for Box<T> {
    fn prompt(&self, message: &str, default: Option<&str>) -> Result<String> {
        (**self).prompt(message, default)
    }
}

fn resolve_answer(line: &str, default: Option<&str>) -> String {
    if line.trim().is_empty() {
        return default.unwrap_or_default().to_string();
    }

    let answer = line.strip_suffix('\n').unwrap_or(line);
    let answer = answer.strip_suffix('\r').unwrap_or(answer);
    answer.to_string()
}

/// Reads answers from stdin, writing the prompt to stdout.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt(&self, message: &str, default: Option<&str>) -> Result<String> {
        print!("{}", format_prompt(message, default));
        io::stdout().flush()?;

        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            // EOF: behave like an empty answer and keep the cursor tidy
            println!();
        }

        Ok(resolve_answer(&input, default))
    }
}

/// Never reads input; every prompt resolves to its default.
///
/// Used with `--no-input` and in scripts.
pub struct NonInteractivePrompter;

impl Prompter for NonInteractivePrompter {
    fn prompt(&self, _message: &str, default: Option<&str>) -> Result<String> {
        Ok(default.unwrap_or_default().to_string())
    }
}

/// Canned answers for tests.
///
/// Answers are consumed in order; asking more questions than were scripted
/// is an error so unexpected prompts fail loudly.
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// A prompter with no answers; any prompt is an error.
    pub fn silent() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// Prompt messages seen so far, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&self, message: &str, default: Option<&str>) -> Result<String> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(message.to_string());
        }

        let answer = self
            .answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front())
            .ok_or_else(|| ShortcutError::prompt(format!("no scripted answer for '{}'", message)))?;

        Ok(resolve_answer(&answer, default))
    }
}

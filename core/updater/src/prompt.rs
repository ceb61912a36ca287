//! Injectable prompt provider
//!
//! Interactive and headless call sites share the same decision logic; the
//! difference between them is confined to this trait.

use std::io::Write;

/// Status-line sink plus yes/no questions for the update flow.
pub trait Prompt {
    /// Emit a status line to the user.
    fn line(&mut self, text: &str);

    /// Ask a yes/no question.
    ///
    /// Implementations must default to "no" on any unreadable or
    /// unrecognized answer.
    fn confirm(&mut self, question: &str) -> bool;
}

/// No-op sink that refuses every question.
///
/// Headless callers pass this together with auto-confirm, which
/// short-circuits all prompts before they would be asked.
#[derive(Debug, Default)]
pub struct SilentPrompt;

impl Prompt for SilentPrompt {
    fn line(&mut self, _text: &str) {}

    fn confirm(&mut self, _question: &str) -> bool {
        false
    }
}

/// Terminal prompt printing to stdout and reading answers from stdin.
#[derive(Debug, Default)]
pub struct TermPrompt;

impl Prompt for TermPrompt {
    fn line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn confirm(&mut self, question: &str) -> bool {
        println!("{}", question);
        print!("> ");
        let _ = std::io::stdout().flush();

        let mut answer = String::new();
        if std::io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        answer.trim().eq_ignore_ascii_case("y")
    }
}

//! Interactive input/output
//!
//! Workflows talk to the user only through [`Prompt`], so the same state
//! machines run against the terminal or against a scripted answer list.

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::crypto::SecureString;
use crate::error::{TallyError, TallyResult};

/// A source of answers and a sink for messages
pub trait Prompt {
    /// Show `question` and read one line, without its line terminator
    fn ask(&mut self, question: &str) -> TallyResult<String>;

    /// Like `ask`, but the answer is not echoed where possible
    fn ask_secret(&mut self, question: &str) -> TallyResult<SecureString>;

    /// Show a message on its own line
    fn say(&mut self, message: &str) -> TallyResult<()>;
}

/// Prompt bound to the process's stdin and stdout
pub struct ConsolePrompt {
    hide_secrets: bool,
}

impl ConsolePrompt {
    /// Secrets are hidden only when stdin is a terminal; piped input is read
    /// as plain lines
    pub fn new() -> Self {
        Self {
            hide_secrets: io::stdin().is_terminal(),
        }
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for ConsolePrompt {
    fn ask(&mut self, question: &str) -> TallyResult<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{}", question)?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(TallyError::InputClosed);
        }

        Ok(strip_line_ending(line))
    }

    fn ask_secret(&mut self, question: &str) -> TallyResult<SecureString> {
        if !self.hide_secrets {
            return self.ask(question).map(SecureString::from);
        }

        rpassword::prompt_password(question)
            .map(SecureString::from)
            .map_err(|e| TallyError::Io(format!("Failed to read password: {}", e)))
    }

    fn say(&mut self, message: &str) -> TallyResult<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", message)?;
        Ok(())
    }
}

fn strip_line_ending(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    line
}

/// Prompt that answers from a fixed queue and records everything shown
///
/// Runs out of answers with [`TallyError::InputClosed`], like a closed stdin.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Every question and message, in order
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// The transcript joined with newlines
    pub fn output(&self) -> String {
        self.transcript.join("\n")
    }

    /// Answers not yet consumed
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, question: &str) -> TallyResult<String> {
        self.transcript.push(question.to_string());
        self.answers.pop_front().ok_or(TallyError::InputClosed)
    }

    fn ask_secret(&mut self, question: &str) -> TallyResult<SecureString> {
        self.ask(question).map(SecureString::from)
    }

    fn say(&mut self, message: &str) -> TallyResult<()> {
        self.transcript.push(message.to_string());
        Ok(())
    }
}

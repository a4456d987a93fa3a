//! # RWeb Interactive Prompts
//!
//! File: cli/src/common/ui/prompts.rs
//!
//! ## Overview
//!
//! Yes/no confirmation behind a small trait so code that must not act
//! without consent (overwriting a config file) can be driven by a real
//! terminal in the binary and by a scripted answer in tests.
//!
use crate::core::error::Result;
use anyhow::Context;
use std::io::{self, BufRead, Write};
use tracing::warn;

/// A source of yes/no answers.
pub trait Confirm {
    /// Asks `question` and returns whether the answer was affirmative.
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Answers from the controlling terminal. `y`, `yes` and a bare Enter
/// count as yes, matching the `(Y/n)` hint. End of input counts as no.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let mut stdout = io::stdout();
        write!(stdout, "{} (Y/n): ", question).context("Failed to write prompt")?;
        stdout.flush().context("Failed to flush prompt")?;

        read_answer(&mut io::stdin().lock())
    }
}

/// Reads one answer line. End of input counts as no, so a closed stdin
/// never confirms anything.
fn read_answer(input: &mut impl BufRead) -> Result<bool> {
    let mut answer = String::new();
    let read = input
        .read_line(&mut answer)
        .context("Failed to read answer from stdin")?;
    if read == 0 {
        warn!("No answer on stdin, treating it as no");
        return Ok(false);
    }
    Ok(is_affirmative(&answer))
}

/// Interprets a typed answer to a `(Y/n)` question.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "" | "y" | "yes")
}

/// A fixed answer, for non-interactive callers and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&mut self, _question: &str) -> Result<bool> {
        Ok(self.0)
    }
}

//! Operator confirmation for the fix path.

use std::io::{self, BufRead, IsTerminal, Write};

use console::Term;
use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;

/// Source of the yes/no answer before the configuration is rewritten.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

/// Only `yes`, ignoring case and surrounding whitespace, counts as consent.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().to_lowercase() == "yes"
}

/// Fixed answer, used for `--yes` / `--no`.
#[derive(Debug, Clone, Copy)]
pub struct Preset(pub bool);

impl Confirm for Preset {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        tracing::debug!(prompt, answer = self.0, "answered without prompting");
        Ok(self.0)
    }
}

/// Prints the prompt to `output` and reads one line from `input`. EOF means no.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for LinePrompt<R, W> {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            tracing::debug!("stdin closed before an answer was given");
            return Ok(false);
        }
        Ok(is_affirmative(&line))
    }
}

/// Interactive prompt on the process's own stdin.
///
/// A terminal gets a dialoguer text input drawn on stdout; piped stdin falls back to a plain
/// line read so scripted answers (`echo yes | tftpl-check`) keep working.
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Confirm for StdinPrompt {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        if !io::stdin().is_terminal() {
            return LinePrompt::new(io::stdin().lock(), io::stdout().lock()).confirm(prompt);
        }

        let answer = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.trim_end().trim_end_matches(':'))
            .allow_empty(true)
            .interact_text_on(&Term::stdout());

        match answer {
            Ok(text) => Ok(is_affirmative(&text)),
            Err(dialoguer::Error::IO(err)) if err.kind() == io::ErrorKind::UnexpectedEof => {
                Ok(false)
            }
            Err(dialoguer::Error::IO(err)) => Err(err),
        }
    }
}

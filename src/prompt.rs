//! Interactive prompts.
//!
//! Commands talk to a [`Prompter`] so the same flow can be driven by a
//! terminal or by a script in tests.

use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password, Select};

use crate::error::{Result, SetupError};

pub trait Prompter {
    /// A single line of free text. May be empty.
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Hidden input.
    fn password(&mut self, prompt: &str) -> Result<String>;

    /// Returns the index of the chosen item.
    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize>;

    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Terminal prompts rendered with dialoguer.
pub struct TermPrompter {
    theme: ColorfulTheme,
}

impl TermPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TermPrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Interrupts, EOF and a missing terminal all end the run as a user abort.
fn aborted(err: dialoguer::Error) -> SetupError {
    tracing::debug!(error = %err, "Prompt ended");
    SetupError::Aborted
}

impl Prompter for TermPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(aborted)
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(aborted)
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        if items.is_empty() {
            return Err(SetupError::Validation("Nothing to choose from".to_string()));
        }
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(aborted)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(aborted)
    }
}

/// Asks until `validate` accepts the trimmed answer, reporting each rejection on stderr.
pub fn ask_until_valid<F>(prompter: &mut dyn Prompter, prompt: &str, validate: F) -> Result<String>
where
    F: Fn(&str) -> Result<()>,
{
    loop {
        let answer = prompter.input(prompt)?.trim().to_string();
        match validate(&answer) {
            Ok(()) => return Ok(answer),
            Err(e) => eprintln!("{} Please try again.", e.to_string().red()),
        }
    }
}

/// Uses `given` when present, failing immediately if it is invalid;
/// otherwise prompts until a valid answer arrives.
pub fn given_or_ask<F>(
    prompter: &mut dyn Prompter,
    given: Option<String>,
    prompt: &str,
    validate: F,
) -> Result<String>
where
    F: Fn(&str) -> Result<()>,
{
    match given {
        Some(value) => {
            let value = value.trim().to_string();
            validate(&value)?;
            Ok(value)
        }
        None => ask_until_valid(prompter, prompt, validate),
    }
}

//! The git identity this tool reads and writes: commit name, commit email
//! and GitHub login.

use std::path::Path;

use crate::error::Result;
use crate::git::{
    ConfigScope, Git, GitConfig, KEY_GITHUB_LOGIN, KEY_USER_EMAIL, KEY_USER_NAME,
};
use crate::prompt::{Prompter, given_or_ask};
use crate::validation::{validate_email, validate_not_empty};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub github_login: String,
}

/// Values already known from flags; the rest is prompted for.
#[derive(Debug, Clone, Default)]
pub struct IdentityInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub github_login: Option<String>,
}

fn non_empty_name(value: &str) -> Result<()> {
    validate_not_empty("Full name", value)
}

fn non_empty_login(value: &str) -> Result<()> {
    validate_not_empty("GitHub username", value)
}

impl Identity {
    /// Validates given values and prompts for missing ones.
    pub fn collect(prompter: &mut dyn Prompter, input: IdentityInput) -> Result<Self> {
        let name = given_or_ask(prompter, input.name, "Full name", non_empty_name)?;
        let email = given_or_ask(prompter, input.email, "Email address", validate_email)?;
        let github_login =
            given_or_ask(prompter, input.github_login, "GitHub username", non_empty_login)?;
        Ok(Self {
            name,
            email,
            github_login,
        })
    }

    /// Takes whatever the global config already holds and prompts for the rest.
    /// `login` wins over the configured GitHub login.
    pub fn from_config(
        prompter: &mut dyn Prompter,
        global: &GitConfig,
        login: Option<String>,
    ) -> Result<Self> {
        let name = match global.get(KEY_USER_NAME) {
            Some(name) => name.clone(),
            None => given_or_ask(prompter, None, "Enter your full name", non_empty_name)?,
        };
        let email = match global.get(KEY_USER_EMAIL) {
            Some(email) => email.clone(),
            None => given_or_ask(prompter, None, "Enter your email address", validate_email)?,
        };
        let github_login = match login.or_else(|| global.get(KEY_GITHUB_LOGIN).cloned()) {
            Some(login) => login,
            None => given_or_ask(prompter, None, "Enter your GitHub username", non_empty_login)?,
        };
        Ok(Self {
            name,
            email,
            github_login,
        })
    }

    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            (KEY_USER_NAME, self.name.as_str()),
            (KEY_USER_EMAIL, self.email.as_str()),
            (KEY_GITHUB_LOGIN, self.github_login.as_str()),
        ]
    }

    /// Writes every key to `scope`, skipping keys already present in `existing`.
    pub fn write(
        &self,
        git: &Git<'_>,
        scope: ConfigScope,
        cwd: Option<&Path>,
        existing: Option<&GitConfig>,
    ) -> Result<()> {
        for (key, value) in self.entries() {
            if existing.is_some_and(|config| config.contains_key(key)) {
                continue;
            }
            git.config_set(scope, key, value, cwd)?;
        }
        Ok(())
    }
}

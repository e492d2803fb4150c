//! Input validation for prompted and command-line values.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, SetupError};

/// Maximum repository name length accepted by GitHub.
pub const MAX_REPO_NAME_LENGTH: usize = 100;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+").expect("valid email regex"));

/// Basic email format check: something, `@`, something, `.`, something.
pub fn validate_email(email: &str) -> Result<()> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(SetupError::Validation(format!(
            "Invalid email address format: '{}'",
            email
        )))
    }
}

/// Rejects values that are empty after trimming. `field` names the value in the error.
pub fn validate_not_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SetupError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

/// Validates a repository name, which also becomes a local directory name.
pub fn validate_repo_name(name: &str) -> Result<()> {
    validate_not_empty("Repository name", name)?;
    if name.len() > MAX_REPO_NAME_LENGTH {
        return Err(SetupError::Validation(format!(
            "Repository name exceeds maximum length of {} characters",
            MAX_REPO_NAME_LENGTH
        )));
    }
    if name == "." || name == ".." {
        return Err(SetupError::Validation(format!(
            "'{}' is not a valid repository name",
            name
        )));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(SetupError::Validation(format!(
            "Repository name cannot contain '{}'",
            c
        )));
    }
    Ok(())
}

/// Validates an `OWNER/REPO` full name and returns the repo part.
pub fn validate_full_name(full_name: &str) -> Result<&str> {
    match full_name.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.contains('/') => {
            validate_repo_name(repo)?;
            Ok(repo)
        }
        _ => Err(SetupError::Validation(format!(
            "Expected OWNER/REPO, got '{}'",
            full_name
        ))),
    }
}

//! Token retrieval from the Bitwarden Secrets Manager CLI (`bws`).

use crate::error::{Result, SetupError};
use crate::process::CommandRunner;

/// Environment variable `bws` authenticates with.
pub const BWS_ACCESS_TOKEN_ENV: &str = "BWS_ACCESS_TOKEN";
/// Environment variable naming the secret that holds the GitHub PAT.
pub const GH_TOKEN_ID_ENV: &str = "GH_TOKEN_ID";

pub struct Bws<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Bws<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Fetches the secret value of `secret_id`. Every failure is reported as
    /// [`SetupError::MissingToken`] since the caller has no other use for it.
    pub fn fetch_secret(&self, secret_id: &str) -> Result<String> {
        tracing::info!(secret_id = %secret_id, "Retrieving GitHub token from Bitwarden");
        let output = self
            .runner
            .run_checked("bws", &["secret", "get", secret_id, "-o", "tsv"], None)
            .map_err(|e| SetupError::MissingToken(format!("bws secret get failed: {}", e)))?;

        if output.stdout.trim().is_empty() {
            return Err(SetupError::MissingToken(
                "No output received from 'bws secret get'".to_string(),
            ));
        }

        parse_bws_tsv(&output.stdout).ok_or_else(|| {
            SetupError::MissingToken(
                "Could not find 'password' field in 'bws secret get' output".to_string(),
            )
        })
    }
}

/// Extracts the value from the last `password\t<value>` line of TSV output.
/// Scanning from the end skips any warnings `bws` prints before the table.
pub fn parse_bws_tsv(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .rev()
        .find(|line| line.starts_with("password\t"))
        .and_then(|line| line.trim().split('\t').nth(1))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

//! GitHub token resolution from Bitwarden, the environment or git config.

use std::fmt;

use crate::config::SetupConfig;
use crate::error::{Result, SetupError};
use crate::git::{ConfigScope, Git, KEY_GITHUB_TOKEN};
use crate::logging::redact;
use crate::process::CommandRunner;
use crate::secrets::{BWS_ACCESS_TOKEN_ENV, Bws, GH_TOKEN_ID_ENV};

/// Environment variable holding a GitHub PAT directly.
pub const GITHUB_ACCESS_TOKEN_ENV: &str = "GITHUB_ACCESS_TOKEN";

/// A GitHub credential. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Bitwarden,
    Environment,
    GitConfig,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Bitwarden => write!(f, "Bitwarden"),
            TokenSource::Environment => write!(f, "{}", GITHUB_ACCESS_TOKEN_ENV),
            TokenSource::GitConfig => write!(f, "git config {}", KEY_GITHUB_TOKEN),
        }
    }
}

/// Order used by the interactive `init` utility.
pub const BITWARDEN_FIRST: &[TokenSource] = &[
    TokenSource::Bitwarden,
    TokenSource::Environment,
    TokenSource::GitConfig,
];

/// Order used by `mkrepo` and `clone`.
pub const ENVIRONMENT_FIRST: &[TokenSource] = &[
    TokenSource::Environment,
    TokenSource::GitConfig,
    TokenSource::Bitwarden,
];

pub type EnvLookup = dyn Fn(&str) -> Option<String>;

pub struct TokenResolver<'a> {
    runner: &'a dyn CommandRunner,
    env: &'a EnvLookup,
    config: &'a SetupConfig,
}

impl<'a> TokenResolver<'a> {
    pub fn new(runner: &'a dyn CommandRunner, env: &'a EnvLookup, config: &'a SetupConfig) -> Self {
        Self {
            runner,
            env,
            config,
        }
    }

    /// Tries each source in order and returns the first token found.
    pub fn resolve(&self, order: &[TokenSource]) -> Result<(Token, TokenSource)> {
        let mut reasons = Vec::new();
        for &source in order {
            match self.try_source(source) {
                Ok(token) => {
                    tracing::info!(source = %source, "Using GitHub token");
                    return Ok((token, source));
                }
                Err(reason) => {
                    tracing::debug!(source = %source, reason = %redact(&reason), "Token source unavailable");
                    reasons.push(format!("{}: {}", source, reason));
                }
            }
        }
        Err(SetupError::MissingToken(reasons.join("; ")))
    }

    fn try_source(&self, source: TokenSource) -> std::result::Result<Token, String> {
        match source {
            TokenSource::Environment => self
                .non_empty_env(GITHUB_ACCESS_TOKEN_ENV)
                .map(Token::new)
                .ok_or_else(|| "not set".to_string()),
            TokenSource::GitConfig => match Git::new(self.runner)
                .config_get(ConfigScope::Global, KEY_GITHUB_TOKEN)
            {
                Ok(Some(value)) => Ok(Token::new(value)),
                Ok(None) => Err("not set".to_string()),
                Err(e) => Err(e.to_string()),
            },
            TokenSource::Bitwarden => {
                if self.non_empty_env(BWS_ACCESS_TOKEN_ENV).is_none() {
                    return Err(format!("{} not set", BWS_ACCESS_TOKEN_ENV));
                }
                let secret_id = self
                    .non_empty_env(GH_TOKEN_ID_ENV)
                    .or_else(|| self.config.secrets.bws_secret_id.clone())
                    .ok_or_else(|| {
                        format!("no secret id ({} or secrets.bws_secret_id)", GH_TOKEN_ID_ENV)
                    })?;
                Bws::new(self.runner)
                    .fetch_secret(&secret_id)
                    .map(Token::new)
                    .map_err(|e| e.to_string())
            }
        }
    }

    fn non_empty_env(&self, key: &str) -> Option<String> {
        (self.env)(key).filter(|value| !value.trim().is_empty())
    }
}

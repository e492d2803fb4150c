//! # ghsetup - routine GitHub repository setup
//!
//! A small interactive CLI that wraps the handful of steps it takes to get a
//! GitHub repository going: fetching a token, creating the remote, initializing
//! or cloning the local copy, and setting the git identity.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive: create or clone, token from Bitwarden
//! BWS_ACCESS_TOKEN=... GH_TOKEN_ID=... ghsetup init
//!
//! # Create a repository with a token from the environment
//! GITHUB_ACCESS_TOKEN=ghp_... ghsetup mkrepo my-project
//!
//! # Set the global git identity
//! ghsetup configure --name "Ada Lovelace" --email ada@example.com --github-user ada
//! ```
//!
//! ## Exit codes
//!
//! `0` success, `1` failure or abort, `2` no GitHub token, `99` unexpected error.
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Settings file loading
//! - [`error`]: Error types, result alias and exit codes
//! - [`git`]: `git` command wrapper
//! - [`github`]: GitHub REST client
//! - [`secrets`]: Bitwarden `bws` token retrieval
//! - [`token`]: Token source resolution
//! - [`validation`]: Input validation utilities

/// Command-line interface definitions using clap.
pub mod cli;

/// Settings loading.
///
/// Handles `config.toml` in the platform config directory.
pub mod config;

/// Error types and result aliases.
///
/// Defines `SetupError`, `Result<T>` and the process exit codes.
pub mod error;

pub mod git;

/// GitHub REST API client.
pub mod github;

pub mod identity;
pub mod logging;
pub mod process;

/// Interactive prompts.
pub mod prompt;

pub mod secrets;
pub mod token;

/// Input validation utilities.
///
/// Validates emails, repository names and required values.
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

//! GitHub REST API access.
//!
//! ## Components
//!
//! - [`GithubApi`]: the operations used by the commands
//! - [`GithubClient`]: blocking `reqwest` implementation against `api.github.com`
//! - request and response payloads in [`types`]

mod client;
pub mod types;

pub use client::{BasicCredentials, GithubApi, GithubClient, next_link};
pub use types::{Authorization, NewAuthorization, NewRepository, Repository};

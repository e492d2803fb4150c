use anyhow::{Context, Result};
use colored::Colorize;

use crate::error::SetupError;
use crate::git::{ConfigScope, Git, KEY_CREDENTIAL_HELPER};
use crate::github::GithubApi;
use crate::token::{ENVIRONMENT_FIRST, Token};
use crate::validation::validate_full_name;

use super::CommandContext;

pub fn handle_clone(
    ctx: &mut CommandContext<'_>,
    github: &dyn GithubApi,
    full_name: Option<String>,
) -> Result<()> {
    if let Some(ref name) = full_name {
        validate_full_name(name)?;
    }
    let (token, _) = ctx.resolve_token(ENVIRONMENT_FIRST)?;
    clone_repository(ctx, github, &token, full_name)
}

/// Clones `full_name`, or a repository picked from the user's list, into the
/// working directory and points its credential helper at the configured one.
pub(crate) fn clone_repository(
    ctx: &mut CommandContext<'_>,
    github: &dyn GithubApi,
    token: &Token,
    full_name: Option<String>,
) -> Result<()> {
    let full_name = match full_name {
        Some(name) => name,
        None => choose_repository(ctx, github, token)?,
    };
    let dir_name = validate_full_name(&full_name)?.to_string();

    let repo_path = ctx.cwd.join(&dir_name);
    if repo_path.exists() {
        return Err(SetupError::AlreadyExists(dir_name).into());
    }

    println!("Cloning '{}' into ./{}...", full_name.cyan(), dir_name);
    let clone_url = format!(
        "{}/{}.git",
        ctx.config.github.web_url.trim_end_matches('/'),
        full_name
    );

    let git = Git::new(ctx.runner);
    git.clone_repo(&clone_url, &dir_name, &ctx.cwd)
        .context("Failed to clone repository")?;

    let helper = ctx.config.git.credential_helper();
    println!("Configuring local {} to '{}'", KEY_CREDENTIAL_HELPER, helper);
    git.config_set(
        ConfigScope::Local,
        KEY_CREDENTIAL_HELPER,
        &helper,
        Some(&repo_path),
    )
    .context("Failed to configure credential helper")?;

    println!("{} {}", "Cloned".green(), full_name.cyan());
    Ok(())
}

fn choose_repository(
    ctx: &mut CommandContext<'_>,
    github: &dyn GithubApi,
    token: &Token,
) -> Result<String> {
    println!("Fetching list of your repositories from GitHub...");
    let mut names: Vec<String> = github
        .list_repositories(token)
        .context("Error fetching repositories from GitHub")?
        .into_iter()
        .map(|repo| repo.full_name)
        .collect();
    if names.is_empty() {
        return Err(SetupError::NotFound("no repositories to clone".to_string()).into());
    }
    names.sort();
    println!("Found {} repositories.", names.len());

    let index = ctx
        .prompter
        .select("Select a repository to clone", &names)?;
    Ok(names.swap_remove(index))
}

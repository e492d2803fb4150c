use anyhow::{Context, Result};
use colored::Colorize;

use crate::git::{ConfigScope, Git, KEY_GITHUB_LOGIN};
use crate::github::GithubApi;
use crate::prompt::ask_until_valid;
use crate::token::BITWARDEN_FIRST;
use crate::validation::validate_not_empty;

use super::CommandContext;
use super::clone::clone_repository;
use super::mkrepo::{CreateOptions, create_repository};

const ACTIONS: [&str; 2] = ["Create a new repository", "Clone an existing repository"];

pub fn handle_init(ctx: &mut CommandContext<'_>, github: &dyn GithubApi) -> Result<()> {
    println!("{}", "GitHub Repository Utility".bold());

    let (token, source) = ctx.resolve_token(BITWARDEN_FIRST)?;
    println!("{} GitHub token from {}", "Retrieved".green(), source);

    let git = Git::new(ctx.runner);
    let version = git.version().context(
        "'git' command not found or not working. Please install Git and ensure it's in your PATH",
    )?;
    tracing::debug!(version = %version, "Found git");

    let global = git.config_list(ConfigScope::Global, None);
    let username = match global.get(KEY_GITHUB_LOGIN) {
        Some(login) => login.clone(),
        None => {
            println!("GitHub username not found in global git config ({}).", KEY_GITHUB_LOGIN);
            ask_until_valid(ctx.prompter, "Please enter your GitHub username", |v| {
                validate_not_empty("GitHub username", v)
            })?
        }
    };

    let items: Vec<String> = ACTIONS.iter().map(|a| a.to_string()).collect();
    match ctx.prompter.select("What would you like to do?", &items)? {
        0 => create_repository(
            ctx,
            github,
            &token,
            CreateOptions {
                username: Some(username),
                ..Default::default()
            },
        )?,
        _ => clone_repository(ctx, github, &token, None)?,
    }

    println!();
    println!("{}", "Operation completed successfully.".green());
    Ok(())
}

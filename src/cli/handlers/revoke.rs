use anyhow::{Context, Result};
use colored::Colorize;

use crate::github::{BasicCredentials, GithubApi};
use crate::prompt::given_or_ask;
use crate::validation::validate_not_empty;

use super::CommandContext;

pub fn handle_revoke(
    ctx: &mut CommandContext<'_>,
    github: &dyn GithubApi,
    username: Option<String>,
    force: bool,
) -> Result<()> {
    let username = given_or_ask(ctx.prompter, username, "GitHub username", |v| {
        validate_not_empty("GitHub username", v)
    })?;
    let password = ctx.prompter.password("GitHub password")?;
    let creds = BasicCredentials { username, password };

    let authorizations = github
        .list_authorizations(&creds)
        .context("Failed to list authorizations")?;
    if authorizations.is_empty() {
        println!("No authorizations found.");
        return Ok(());
    }

    let items: Vec<String> = authorizations
        .iter()
        .enumerate()
        .map(|(i, auth)| format!("[{}] {} {}", i, auth.id, auth.app.name))
        .collect();
    let index = ctx
        .prompter
        .select("Select the token to delete", &items)?;
    let auth = &authorizations[index];

    if !force {
        let question = format!("Delete authorization {} ({}) permanently?", auth.id, auth.app.name);
        if !ctx.prompter.confirm(&question)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    github
        .delete_authorization(&creds, auth.id)
        .context("Failed to delete authorization")?;
    println!(
        "{} authorization {} ({})",
        "Deleted".red(),
        auth.id.to_string().cyan(),
        auth.app.name
    );
    Ok(())
}

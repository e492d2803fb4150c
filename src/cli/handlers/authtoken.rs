use anyhow::{Context, Result};
use colored::Colorize;

use crate::error::SetupError;
use crate::git::{ConfigScope, Git, KEY_CREDENTIAL_HELPER};
use crate::github::{BasicCredentials, GithubApi, NewAuthorization};
use crate::identity::{Identity, IdentityInput};
use crate::prompt::given_or_ask;
use crate::validation::validate_not_empty;

use super::CommandContext;

/// Creates a repo-scoped personal access token and, unless `no_configure`,
/// writes the git identity globally.
pub fn handle_token(
    ctx: &mut CommandContext<'_>,
    github: &dyn GithubApi,
    note: Option<String>,
    input: IdentityInput,
    no_configure: bool,
) -> Result<()> {
    let (identity, username) = if no_configure {
        let username = given_or_ask(ctx.prompter, input.github_login, "GitHub username", |v| {
            validate_not_empty("GitHub username", v)
        })?;
        (None, username)
    } else {
        let identity = Identity::collect(ctx.prompter, input)?;
        let username = identity.github_login.clone();
        (Some(identity), username)
    };

    let password = ctx.prompter.password("GitHub password")?;
    let note = match note {
        Some(note) => Some(note),
        None => Some(ctx.prompter.input("Note (optional)")?),
    };

    let creds = BasicCredentials { username, password };
    let auth = github
        .create_authorization(&creds, &NewAuthorization::repo_scoped(note))
        .context("Failed to create personal access token")?;
    let token = auth
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SetupError::MissingToken("GitHub response did not include a token".into()))?;

    println!("{}", token);

    if let Some(identity) = identity {
        let git = Git::new(ctx.runner);
        let global = git.config_list(ConfigScope::Global, None);
        identity
            .write(&git, ConfigScope::Global, None, None)
            .context("Failed to write git identity")?;
        if !global.contains_key(KEY_CREDENTIAL_HELPER) {
            git.config_set(
                ConfigScope::Global,
                KEY_CREDENTIAL_HELPER,
                &ctx.config.git.credential_helper(),
                None,
            )
            .context("Failed to configure credential helper")?;
        }
        eprintln!(
            "{} git for {} <{}> as {}",
            "Configured".green(),
            identity.name,
            identity.email,
            identity.github_login.cyan()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::handlers::test_support::context;
    use crate::error::{EXIT_MISSING_TOKEN, exit_code_for};
    use crate::testing::{FakeGithub, FakeRunner, ScriptedPrompter, env_from};
    use tempfile::TempDir;

    #[test]
    fn test_token_configures_identity() {
        let temp_dir = TempDir::new().unwrap();
        let runner = FakeRunner::new().respond("git config --global -l", "credential.helper=store\n");
        let mut prompter = ScriptedPrompter::new([
            "Ada Lovelace",
            "ada@example.com",
            "ada",
            "hunter2",
        ]);
        let env = env_from(&[]);
        let mut ctx = context(temp_dir.path(), &runner, &mut prompter, &env);
        let github = FakeGithub::new();

        handle_token(
            &mut ctx,
            &github,
            Some("laptop".into()),
            IdentityInput::default(),
            false,
        )
        .unwrap();

        let authorized = github.authorized.borrow();
        assert_eq!(authorized[0].note.as_deref(), Some("laptop"));
        assert_eq!(authorized[0].scopes, vec!["repo"]);
        assert_eq!(
            runner.calls(),
            vec![
                "git config --global -l",
                "git config --global user.name Ada Lovelace",
                "git config --global user.email ada@example.com",
                "git config --global user.github.login.name ada",
            ]
        );
    }

    #[test]
    fn test_token_without_configure_prompts_note() {
        let temp_dir = TempDir::new().unwrap();
        let runner = FakeRunner::new();
        let mut prompter = ScriptedPrompter::new(["hunter2", ""]);
        let env = env_from(&[]);
        let mut ctx = context(temp_dir.path(), &runner, &mut prompter, &env);
        let github = FakeGithub::new();

        handle_token(
            &mut ctx,
            &github,
            None,
            IdentityInput {
                github_login: Some("ada".into()),
                ..Default::default()
            },
            true,
        )
        .unwrap();

        assert!(github.authorized.borrow()[0].note.is_none());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_response_without_token_is_missing_token() {
        let temp_dir = TempDir::new().unwrap();
        let runner = FakeRunner::new();
        let mut prompter = ScriptedPrompter::new(["hunter2"]);
        let env = env_from(&[]);
        let mut ctx = context(temp_dir.path(), &runner, &mut prompter, &env);

        let err = handle_token(
            &mut ctx,
            &FakeGithub {
                withhold_token: true,
                ..FakeGithub::new()
            },
            Some("laptop".into()),
            IdentityInput {
                github_login: Some("ada".into()),
                ..Default::default()
            },
            true,
        )
        .unwrap_err();

        assert_eq!(exit_code_for(&err), EXIT_MISSING_TOKEN);
    }
}

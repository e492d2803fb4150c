use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::SetupConfig;
use crate::error::SetupError;
use crate::git::{ConfigScope, Git, GitConfig, KEY_CREDENTIAL_HELPER, KEY_PUSH_DEFAULT};
use crate::github::{GithubApi, NewRepository};
use crate::identity::Identity;
use crate::prompt::given_or_ask;
use crate::token::{ENVIRONMENT_FIRST, Token};
use crate::validation::validate_repo_name;

use super::CommandContext;

const REMOTE_NAME: &str = "origin";
const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";

#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub name: Option<String>,
    /// GitHub login already known to the caller.
    pub username: Option<String>,
    pub description: Option<String>,
    pub public: bool,
    pub remote_only: bool,
}

pub fn handle_mkrepo(
    ctx: &mut CommandContext<'_>,
    github: &dyn GithubApi,
    options: CreateOptions,
) -> Result<()> {
    let (token, _) = ctx.resolve_token(ENVIRONMENT_FIRST)?;
    create_repository(ctx, github, &token, options)
}

/// Creates the remote repository and, unless `remote_only`, a matching local
/// one with a first commit pushed.
pub(crate) fn create_repository(
    ctx: &mut CommandContext<'_>,
    github: &dyn GithubApi,
    token: &Token,
    options: CreateOptions,
) -> Result<()> {
    let repo_name = given_or_ask(
        ctx.prompter,
        options.name,
        "Enter a unique name for the new repository",
        validate_repo_name,
    )?;

    let repo_path = ctx.cwd.join(&repo_name);
    if !options.remote_only && repo_path.exists() {
        return Err(SetupError::AlreadyExists(repo_name).into());
    }

    let git = Git::new(ctx.runner);
    let global = git.config_list(ConfigScope::Global, None);
    let identity = if options.remote_only {
        None
    } else {
        Some(Identity::from_config(ctx.prompter, &global, options.username)?)
    };

    let private = !options.public && ctx.config.repo.private;
    let request = NewRepository {
        name: repo_name.clone(),
        description: Some(
            options
                .description
                .unwrap_or_else(|| ctx.config.repo.description.clone()),
        ),
        private,
        auto_init: options.remote_only,
    };

    println!(
        "Creating new {} repository '{}' on GitHub...",
        if private { "private" } else { "public" },
        repo_name.cyan()
    );
    let repo = github
        .create_repository(token, &request)
        .context("Error creating repository on GitHub")?;
    println!(
        "{} remote repository {}",
        "Created".green(),
        repo.html_url.as_deref().unwrap_or(&repo.full_name)
    );

    let Some(identity) = identity else {
        return Ok(());
    };

    println!("Initializing local repository in ./{}...", repo_name);
    let local = LocalSetup {
        git: &git,
        github,
        config: &ctx.config,
        global: &global,
        identity: &identity,
        repo_name: &repo_name,
        path: &repo_path,
    };
    let remote_url = local.run().map_err(|e| SetupError::PartialSetup {
        remote: repo.full_name.clone(),
        reason: e.to_string(),
    })?;

    println!();
    println!(
        "{} repository {}",
        "Initialized".green(),
        repo_name.cyan().bold()
    );
    println!("  Local path: {}", display_path(&repo_path));
    println!("  Remote URL: {}", remote_url);
    Ok(())
}

struct LocalSetup<'a> {
    git: &'a Git<'a>,
    github: &'a dyn GithubApi,
    config: &'a SetupConfig,
    global: &'a GitConfig,
    identity: &'a Identity,
    repo_name: &'a str,
    path: &'a Path,
}

impl LocalSetup<'_> {
    /// Returns the configured remote URL.
    fn run(&self) -> crate::error::Result<String> {
        std::fs::create_dir(self.path)?;
        self.git.init(self.path)?;

        self.identity
            .write(self.git, ConfigScope::Local, Some(self.path), Some(self.global))?;
        self.ensure_global_defaults();

        let remote_url = format!(
            "{}/{}/{}.git",
            self.config.github.web_url.trim_end_matches('/'),
            self.identity.github_login,
            self.repo_name
        );
        self.git.remote_add(self.path, REMOTE_NAME, &remote_url)?;

        std::fs::write(
            self.path.join("README.md"),
            readme_content(self.repo_name, &self.identity.github_login),
        )?;
        println!("  Created README.md");
        self.write_license();

        self.git.add_all(self.path)?;
        self.git.commit(self.path, INITIAL_COMMIT_MESSAGE)?;
        let branch = &self.config.repo.default_branch;
        self.git.rename_branch(self.path, branch)?;
        println!("  Pushing initial commit to {} {}...", REMOTE_NAME, branch);
        self.git.push_upstream(self.path, REMOTE_NAME, branch)?;

        Ok(remote_url)
    }

    /// Sets `credential.helper` and `push.default` globally when unset.
    /// Failures here only warrant a warning.
    fn ensure_global_defaults(&self) {
        let helper = self.config.git.credential_helper();
        let defaults = [
            (KEY_CREDENTIAL_HELPER, helper.as_str()),
            (KEY_PUSH_DEFAULT, "simple"),
        ];
        for (key, value) in defaults {
            if self.global.contains_key(key) {
                continue;
            }
            println!("  Setting global {} to '{}'", key, value);
            if let Err(e) = self.git.config_set(ConfigScope::Global, key, value, None) {
                tracing::warn!(key, error = %e, "Failed to set global git default");
            }
        }
    }

    fn write_license(&self) {
        let url = &self.config.repo.license_url;
        let file = &self.config.repo.license_file;
        let result = self
            .github
            .fetch_text(url)
            .and_then(|text| Ok(std::fs::write(self.path.join(file), text)?));
        match result {
            Ok(()) => println!("  Created {}", file),
            Err(e) => eprintln!(
                "{} Failed to fetch {} from {}: {}",
                "Warning:".yellow(),
                file,
                url,
                e
            ),
        }
    }
}

fn readme_content(repo_name: &str, username: &str) -> String {
    format!("# {}\n\nCreated by {} via ghsetup.\n", repo_name, username)
}

fn display_path(path: &Path) -> String {
    path.canonicalize()
        .unwrap_or_else(|_| PathBuf::from(path))
        .display()
        .to_string()
}

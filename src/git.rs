//! Thin wrapper over the `git` command line.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::process::CommandRunner;

pub const KEY_USER_NAME: &str = "user.name";
pub const KEY_USER_EMAIL: &str = "user.email";
pub const KEY_GITHUB_LOGIN: &str = "user.github.login.name";
pub const KEY_GITHUB_TOKEN: &str = "user.github.token";
pub const KEY_CREDENTIAL_HELPER: &str = "credential.helper";
pub const KEY_PUSH_DEFAULT: &str = "push.default";

/// Parsed output of `git config -l`.
pub type GitConfig = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    Global,
    Local,
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigScope::Global => write!(f, "global"),
            ConfigScope::Local => write!(f, "local"),
        }
    }
}

impl ConfigScope {
    fn flag(self) -> &'static str {
        match self {
            ConfigScope::Global => "--global",
            ConfigScope::Local => "--local",
        }
    }
}

pub struct Git<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Git<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Returns the `git --version` line, failing if git is missing or broken.
    pub fn version(&self) -> Result<String> {
        let output = self.runner.run_checked("git", &["--version"], None)?;
        Ok(output.stdout.trim().to_string())
    }

    /// Reads every key in `scope`. Any failure yields an empty map, since
    /// `git config -l` exits nonzero when the file does not exist yet.
    pub fn config_list(&self, scope: ConfigScope, cwd: Option<&Path>) -> GitConfig {
        match self.runner.run("git", &["config", scope.flag(), "-l"], cwd) {
            Ok(output) if output.success() => parse_config_list(&output.stdout),
            Ok(_) => GitConfig::new(),
            Err(e) => {
                tracing::warn!(scope = %scope, error = %e, "Failed to read git config");
                GitConfig::new()
            }
        }
    }

    pub fn config_get(&self, scope: ConfigScope, key: &str) -> Result<Option<String>> {
        let output = self
            .runner
            .run("git", &["config", scope.flag(), "--get", key], None)?;
        let value = output.stdout.trim();
        if output.success() && !value.is_empty() {
            Ok(Some(value.to_string()))
        } else {
            Ok(None)
        }
    }

    pub fn config_set(
        &self,
        scope: ConfigScope,
        key: &str,
        value: &str,
        cwd: Option<&Path>,
    ) -> Result<()> {
        self.runner
            .run_checked("git", &["config", scope.flag(), key, value], cwd)?;
        Ok(())
    }

    pub fn init(&self, dir: &Path) -> Result<()> {
        self.runner.run_checked("git", &["init"], Some(dir))?;
        Ok(())
    }

    pub fn clone_repo(&self, url: &str, dest: &str, cwd: &Path) -> Result<()> {
        self.runner
            .run_checked("git", &["clone", url, dest], Some(cwd))?;
        Ok(())
    }

    pub fn remote_add(&self, dir: &Path, name: &str, url: &str) -> Result<()> {
        self.runner
            .run_checked("git", &["remote", "add", name, url], Some(dir))?;
        Ok(())
    }

    pub fn add_all(&self, dir: &Path) -> Result<()> {
        self.runner.run_checked("git", &["add", "."], Some(dir))?;
        Ok(())
    }

    pub fn commit(&self, dir: &Path, message: &str) -> Result<()> {
        self.runner
            .run_checked("git", &["commit", "-m", message], Some(dir))?;
        Ok(())
    }

    /// Renames the current branch, `git branch -M <name>`.
    pub fn rename_branch(&self, dir: &Path, name: &str) -> Result<()> {
        self.runner
            .run_checked("git", &["branch", "-M", name], Some(dir))?;
        Ok(())
    }

    pub fn push_upstream(&self, dir: &Path, remote: &str, branch: &str) -> Result<()> {
        self.runner.run_checked(
            "git",
            &["push", "--set-upstream", remote, branch],
            Some(dir),
        )?;
        Ok(())
    }
}

/// Parses `key=value` lines. The value is everything after the first `=`.
/// Lines without `=` are skipped and later duplicates win.
pub fn parse_config_list(stdout: &str) -> GitConfig {
    stdout
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

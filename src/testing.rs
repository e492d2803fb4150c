//! Fakes shared by unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};
use crate::github::{
    Authorization, BasicCredentials, GithubApi, NewAuthorization, NewRepository, Repository,
};
use crate::process::{CommandOutput, CommandRunner};
use crate::prompt::Prompter;
use crate::token::Token;

/// Records every invocation and answers from prefix-matched rules.
/// Unmatched commands succeed with empty output.
#[derive(Default)]
pub struct FakeRunner {
    calls: RefCell<Vec<(Vec<String>, Option<PathBuf>)>>,
    responses: Vec<(String, String)>,
    failures: Vec<String>,
    missing: Vec<String>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, prefix: &str, stdout: &str) -> Self {
        self.responses.push((prefix.to_string(), stdout.to_string()));
        self
    }

    pub fn fail_on(mut self, prefix: &str) -> Self {
        self.failures.push(prefix.to_string());
        self
    }

    pub fn missing(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    /// Each call as a space-joined command line.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(argv, _)| argv.join(" "))
            .collect()
    }

    pub fn argv(&self, index: usize) -> Vec<String> {
        self.calls.borrow()[index].0.clone()
    }

    pub fn cwd(&self, index: usize) -> Option<PathBuf> {
        self.calls.borrow()[index].1.clone()
    }

    pub fn position(&self, prefix: &str) -> Option<usize> {
        self.calls().iter().position(|c| c.starts_with(prefix))
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[&str], cwd: Option<&Path>) -> Result<CommandOutput> {
        if self.missing.iter().any(|m| m == program) {
            return Err(SetupError::CommandNotFound(program.to_string()));
        }
        let argv: Vec<String> = std::iter::once(program)
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect();
        let line = argv.join(" ");
        self.calls
            .borrow_mut()
            .push((argv, cwd.map(Path::to_path_buf)));

        if self.failures.iter().any(|f| line.starts_with(f.as_str())) {
            return Ok(CommandOutput {
                code: Some(1),
                stdout: String::new(),
                stderr: format!("fatal: {} failed", program),
            });
        }
        let stdout = self
            .responses
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, out)| out.clone())
            .unwrap_or_default();
        Ok(CommandOutput {
            code: Some(0),
            stdout,
            stderr: String::new(),
        })
    }
}

/// Answers prompts from a queue; running dry behaves like EOF.
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub prompts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.answers.is_empty()
    }

    fn next(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or(SetupError::Aborted)
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn select(&mut self, prompt: &str, items: &[String]) -> Result<usize> {
        let answer = self.next(prompt)?;
        let index: usize = answer
            .parse()
            .map_err(|_| SetupError::Validation(format!("not an index: {}", answer)))?;
        if index >= items.len() {
            return Err(SetupError::Validation(format!("index out of range: {}", index)));
        }
        Ok(index)
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(matches!(self.next(prompt)?.as_str(), "y" | "yes"))
    }
}

/// In-memory GitHub that records what it was asked to do.
#[derive(Default)]
pub struct FakeGithub {
    pub authorizations: Vec<Authorization>,
    pub repositories: Vec<Repository>,
    pub license: Option<String>,
    pub fail_create: bool,
    /// Answer token creation without the token field.
    pub withhold_token: bool,
    pub created: RefCell<Vec<NewRepository>>,
    pub authorized: RefCell<Vec<NewAuthorization>>,
    pub deleted: RefCell<Vec<u64>>,
}

impl FakeGithub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repos(names: &[&str]) -> Self {
        Self {
            repositories: names.iter().map(|n| repository(n)).collect(),
            ..Self::default()
        }
    }
}

pub fn repository(full_name: &str) -> Repository {
    let name = full_name.rsplit('/').next().unwrap_or(full_name).to_string();
    Repository {
        name,
        full_name: full_name.to_string(),
        html_url: Some(format!("https://github.com/{}", full_name)),
        private: true,
    }
}

pub fn authorization(id: u64, app: &str) -> Authorization {
    Authorization {
        id,
        token: None,
        note: None,
        scopes: vec!["repo".to_string()],
        app: crate::github::types::AuthorizationApp {
            name: app.to_string(),
            url: None,
        },
    }
}

impl GithubApi for FakeGithub {
    fn create_authorization(
        &self,
        _creds: &BasicCredentials,
        request: &NewAuthorization,
    ) -> Result<Authorization> {
        self.authorized.borrow_mut().push(request.clone());
        let mut auth = authorization(99, "ghsetup");
        if !self.withhold_token {
            auth.token = Some("ghp_created".to_string());
        }
        auth.note = request.note.clone();
        Ok(auth)
    }

    fn list_authorizations(&self, _creds: &BasicCredentials) -> Result<Vec<Authorization>> {
        Ok(self.authorizations.clone())
    }

    fn delete_authorization(&self, _creds: &BasicCredentials, id: u64) -> Result<()> {
        self.deleted.borrow_mut().push(id);
        Ok(())
    }

    fn list_repositories(&self, _token: &Token) -> Result<Vec<Repository>> {
        Ok(self.repositories.clone())
    }

    fn create_repository(&self, _token: &Token, request: &NewRepository) -> Result<Repository> {
        if self.fail_create {
            return Err(SetupError::Api {
                status: 422,
                message: "name already exists on this account".to_string(),
            });
        }
        self.created.borrow_mut().push(request.clone());
        Ok(repository(&format!("octocat/{}", request.name)))
    }

    fn fetch_text(&self, url: &str) -> Result<String> {
        self.license.clone().ok_or_else(|| SetupError::Api {
            status: 404,
            message: format!("{} not found", url),
        })
    }
}

pub fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let owned: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| {
        owned
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

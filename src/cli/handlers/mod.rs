mod authtoken;
mod clone;
mod configure;
mod init;
mod mkrepo;
mod revoke;

pub use authtoken::handle_token;
pub use clone::handle_clone;
pub use configure::handle_configure;
pub use init::handle_init;
pub use mkrepo::{CreateOptions, handle_mkrepo};
pub use revoke::handle_revoke;

use crate::config::SetupConfig;
use crate::error::Result;
use crate::process::CommandRunner;
use crate::prompt::Prompter;
use crate::token::{EnvLookup, Token, TokenResolver, TokenSource};
use std::path::PathBuf;

/// Common context passed to all command handlers
pub struct CommandContext<'a> {
    pub config: SetupConfig,
    /// Directory new repositories and clones are created in.
    pub cwd: PathBuf,
    pub runner: &'a dyn CommandRunner,
    pub prompter: &'a mut dyn Prompter,
    pub env: &'a EnvLookup,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        config: SetupConfig,
        cwd: PathBuf,
        runner: &'a dyn CommandRunner,
        prompter: &'a mut dyn Prompter,
        env: &'a EnvLookup,
    ) -> Self {
        Self {
            config,
            cwd,
            runner,
            prompter,
            env,
        }
    }

    pub fn resolve_token(&self, order: &[TokenSource]) -> Result<(Token, TokenSource)> {
        TokenResolver::new(self.runner, self.env, &self.config).resolve(order)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::CommandContext;
    use crate::config::SetupConfig;
    use crate::testing::{FakeRunner, ScriptedPrompter};
    use crate::token::EnvLookup;
    use std::path::Path;

    pub fn context<'a>(
        cwd: &Path,
        runner: &'a FakeRunner,
        prompter: &'a mut ScriptedPrompter,
        env: &'a EnvLookup,
    ) -> CommandContext<'a> {
        CommandContext::new(
            SetupConfig::default(),
            cwd.to_path_buf(),
            runner,
            prompter,
            env,
        )
    }
}

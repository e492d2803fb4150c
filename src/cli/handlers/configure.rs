use anyhow::{Context, Result};
use colored::Colorize;

use crate::git::{
    ConfigScope, Git, KEY_CREDENTIAL_HELPER, KEY_GITHUB_LOGIN, KEY_PUSH_DEFAULT, KEY_USER_EMAIL,
    KEY_USER_NAME,
};
use crate::identity::{Identity, IdentityInput};

use super::CommandContext;

const SHOWN_KEYS: &[&str] = &[
    KEY_USER_NAME,
    KEY_USER_EMAIL,
    KEY_GITHUB_LOGIN,
    KEY_CREDENTIAL_HELPER,
    KEY_PUSH_DEFAULT,
];

pub fn handle_configure(ctx: &mut CommandContext<'_>, input: IdentityInput, show: bool) -> Result<()> {
    let git = Git::new(ctx.runner);

    if show {
        let global = git.config_list(ConfigScope::Global, None);
        for key in SHOWN_KEYS {
            match global.get(*key) {
                Some(value) => println!("{:<24} {}", key, value.cyan()),
                None => println!("{:<24} {}", key, "(unset)".dimmed()),
            }
        }
        return Ok(());
    }

    let identity = Identity::collect(ctx.prompter, input)?;
    identity
        .write(&git, ConfigScope::Global, None, None)
        .context("Failed to write global git config")?;

    println!("{} global git identity", "Configured".green());
    for (key, value) in identity.entries() {
        println!("  {:<24} {}", key, value);
    }
    Ok(())
}

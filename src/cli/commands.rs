use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::error::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::identity::IdentityInput;

#[derive(Parser)]
#[command(name = "ghsetup")]
#[command(
    author,
    version,
    about = "Routine GitHub setup: tokens, new repositories, clones and git identity"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to settings file (defaults to the platform config directory)
    #[arg(long, global = true, env = "GHSETUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Exit code for a failed parse. Help and version requests succeed;
    /// usage errors are ordinary failures, keeping 2 for a missing token.
    pub fn parse_exit_code(err: &clap::Error) -> i32 {
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
            _ => EXIT_FAILURE,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive utility: create a new repository or clone an existing one
    Init,

    /// Create a repository on GitHub and initialize it locally
    #[command(visible_alias = "new")]
    Mkrepo {
        /// Name of the new repository (prompted if omitted)
        name: Option<String>,

        /// Create a public repository instead of a private one
        #[arg(long)]
        public: bool,

        /// Repository description (overrides the configured default)
        #[arg(short, long)]
        description: Option<String>,

        /// Only create the remote repository, initialized by GitHub
        #[arg(long)]
        remote_only: bool,
    },

    /// Clone one of your repositories
    Clone {
        /// Full name OWNER/REPO (choose from a list if omitted)
        full_name: Option<String>,
    },

    /// Create a personal access token and configure git with it
    Token {
        /// Note attached to the token (prompted if omitted)
        note: Option<String>,

        #[command(flatten)]
        identity: IdentityArgs,

        /// Only create and print the token, leave git config alone
        #[arg(long)]
        no_configure: bool,
    },

    /// Delete one of your OAuth authorizations
    Revoke {
        /// GitHub username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Set the global git identity used for commits and GitHub
    Configure {
        #[command(flatten)]
        identity: IdentityArgs,

        /// Print the current global git configuration instead
        #[arg(long, conflicts_with_all = ["name", "email", "github_user"])]
        show: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct IdentityArgs {
    /// Full name for commits (user.name)
    #[arg(long)]
    pub name: Option<String>,

    /// Email address for commits (user.email)
    #[arg(long)]
    pub email: Option<String>,

    /// GitHub login (user.github.login.name)
    #[arg(long)]
    pub github_user: Option<String>,
}

impl From<IdentityArgs> for IdentityInput {
    fn from(args: IdentityArgs) -> Self {
        IdentityInput {
            name: args.name,
            email: args.email,
            github_login: args.github_user,
        }
    }
}

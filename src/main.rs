use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use ghsetup::cli::handlers::{
    CommandContext, CreateOptions, handle_clone, handle_configure, handle_init, handle_mkrepo,
    handle_revoke, handle_token,
};
use ghsetup::cli::{Cli, Commands};
use ghsetup::config::SetupConfig;
use ghsetup::error::{EXIT_FAILURE, exit_code_for};
use ghsetup::github::GithubClient;
use ghsetup::logging;
use ghsetup::process::SystemRunner;
use ghsetup::prompt::TermPrompter;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return exit_code(Cli::parse_exit_code(&err));
        }
    };
    logging::init(cli.verbose, cli.log_file.as_deref());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            let code = exit_code_for(&err);
            if code == EXIT_FAILURE {
                eprintln!("Operation failed or was aborted.");
            }
            exit_code(code)
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX))
}

fn run(cli: Cli) -> Result<()> {
    let config = SetupConfig::load(cli.config.as_deref()).context("Failed to load settings")?;
    let cwd = std::env::current_dir()?;
    let runner = SystemRunner;
    let mut prompter = TermPrompter::new();
    let env = |key: &str| std::env::var(key).ok();

    let github_settings = config.github.clone();
    let github = || GithubClient::new(&github_settings).context("Failed to build HTTP client");
    let mut ctx = CommandContext::new(config, cwd, &runner, &mut prompter, &env);

    match cli.command {
        Commands::Init => handle_init(&mut ctx, &github()?),
        Commands::Mkrepo {
            name,
            public,
            description,
            remote_only,
        } => handle_mkrepo(
            &mut ctx,
            &github()?,
            CreateOptions {
                name,
                username: None,
                description,
                public,
                remote_only,
            },
        ),
        Commands::Clone { full_name } => handle_clone(&mut ctx, &github()?, full_name),
        Commands::Token {
            note,
            identity,
            no_configure,
        } => handle_token(&mut ctx, &github()?, note, identity.into(), no_configure),
        Commands::Revoke { username, force } => {
            handle_revoke(&mut ctx, &github()?, username, force)
        }
        Commands::Configure { identity, show } => handle_configure(&mut ctx, identity.into(), show),
    }
}

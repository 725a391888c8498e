//! autopush - CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use autopush::ai::HttpGeneratorFactory;
use autopush::banner;
use autopush::cli::{Options, error_text, help_text, parse_args, version_text};
use autopush::config::{self, Config, Paths};
use autopush::error::{ConfigError, WorkflowError};
use autopush::git::{SystemGit, git_installed};
use autopush::setup::run_setup;
use autopush::upgrade::{Cargo, REGISTRY_URL, registry_client, run_uninstall, run_upgrade};
use autopush::workflow::{AiContext, TerminalPrompter, run_workflow};

/// Environment variable holding the log filter.
const LOG_ENV_VAR: &str = "AUTOPUSH_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let opts = match parse_args(std::env::args_os()) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{}", error_text(&e));
            return ExitCode::FAILURE;
        }
    };

    if opts.help {
        println!("{}", help_text());
        return ExitCode::SUCCESS;
    }

    if opts.version {
        println!("{}", version_text());
        return ExitCode::SUCCESS;
    }

    let paths = config::paths();
    match &paths {
        Ok(paths) => {
            banner::show_once(&paths.welcome_marker);
        }
        Err(e) => debug!("No config location: {}", e),
    }

    match run(&opts, paths).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by `AUTOPUSH_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(opts: &Options, paths: Result<Paths, ConfigError>) -> Result<()> {
    let prompter = TerminalPrompter;

    if opts.setup {
        let paths = paths?;
        run_setup(&prompter, &paths.config).context("Setup failed")?;
        return Ok(());
    }

    if opts.upgrade {
        let cargo = Cargo::locate()?;
        let client = registry_client()?;
        run_upgrade(&cargo, &client, REGISTRY_URL)
            .await
            .context("Upgrade failed")?;
        return Ok(());
    }

    if opts.uninstall {
        let paths = paths?;
        let cargo = Cargo::locate()?;
        run_uninstall(&cargo, &prompter, &paths).context("Uninstall failed")?;
        return Ok(());
    }

    if !git_installed() {
        return Err(WorkflowError::GitNotInstalled.into());
    }

    let config = paths.map(|p| Config::load_from(&p.config)).unwrap_or_default();
    let factory = HttpGeneratorFactory::new();

    let ai = match config.credentials() {
        Some((provider, api_key)) if !opts.no_ai => Some(AiContext {
            factory: &factory,
            provider,
            api_key: api_key.to_string(),
        }),
        _ => None,
    };

    let git = SystemGit::new();
    run_workflow(&git, &prompter, ai.as_ref(), &opts.workflow()).await?;

    Ok(())
}

//! Sitepush CLI - declarative deploys into a remote content store
//!
//! Usage: sitepush [name:<site> | env:<tag>] [watch] [--json]
//!
//! Without arguments the configured default environment is deployed. The
//! trailing `watch` token keeps the process running and redeploys individual
//! files as they change on disk.

mod cli;
mod ui;

use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use is_terminal::IsTerminal;

use sitepush::config;
use sitepush::credentials::{CredentialProvider, InteractiveCredentials, SuppliedCredentials};
use sitepush::deploy::{DeployTarget, Deployer};
use sitepush::store::http::HttpStore;

use crate::cli::{Cli, Invocation, EXIT_ERROR, EXIT_OK, EXIT_USAGE};
use crate::ui::Console;

fn main() -> ExitCode {
    // The odd help spellings (-help, -?, /?) would be rejected by clap as
    // unknown flags, so they are honored before parsing.
    let raw: Vec<String> = std::env::args().skip(1).collect();
    if cli::wants_help(&raw) {
        print!("{}", cli::usage());
        return ExitCode::from(EXIT_USAGE);
    }

    let parsed = match Cli::try_parse() {
        Ok(parsed) => parsed,
        Err(err) if err.kind() == clap::error::ErrorKind::DisplayVersion => {
            print!("{err}");
            return ExitCode::from(EXIT_OK);
        }
        Err(err) => {
            eprintln!("{err}");
            print!("{}", cli::usage());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let console = Console::detect(parsed.json);

    let (target, watch) = match cli::interpret(&parsed.tokens) {
        Ok(Invocation::Help) => {
            print!("{}", cli::usage());
            return ExitCode::from(EXIT_USAGE);
        }
        Ok(Invocation::Deploy { target, watch }) => (target, watch),
        Err(message) => {
            eprintln!("{message}");
            print!("{}", cli::usage());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    console.banner();

    match run(target, watch, console) {
        Ok(()) => ExitCode::from(EXIT_OK),
        Err(error) => {
            console.fatal(&format!("{error:#}"));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(target: Option<DeployTarget>, watch: bool, console: Console) -> anyhow::Result<()> {
    let (config, warnings) = config::load_with_warnings(Path::new(config::CONFIG_FILE))?;
    for warning in &warnings {
        console.config_warning(warning);
    }

    // Credential document failures are silent; blanks fall through to the
    // provider.
    let overrides = config::load_credentials(Path::new(config::CREDENTIALS_FILE));
    let credentials: Arc<dyn CredentialProvider> =
        if std::io::stdin().is_terminal() && !console.json {
            Arc::new(InteractiveCredentials::new(overrides))
        } else {
            Arc::new(SuppliedCredentials::new(overrides))
        };

    let store = Arc::new(HttpStore::new().context("cannot initialize the HTTP client")?);
    let target = target
        .unwrap_or_else(|| DeployTarget::from_default_environment(&config.default_environment));

    let deployer = Deployer::new(config, store, credentials);
    let outcome = deployer.run(&target, watch, |event| console.sync_event(event))?;

    if outcome.reports.is_empty() {
        console.nothing_to_deploy();
        return Ok(());
    }

    if let Some(mut engine) = outcome.watch {
        let running = Arc::new(AtomicBool::new(true));
        let handler_flag = Arc::clone(&running);
        ctrlc::set_handler(move || {
            handler_flag.store(false, Ordering::SeqCst);
        })
        .context("cannot install the Ctrl+C handler")?;

        console.watch_header();
        engine.run(running, move |event| console.watch_event(&event));
    }

    Ok(())
}

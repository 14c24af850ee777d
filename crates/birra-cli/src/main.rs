//! birra - Command-line client for the Birracraft back-office API.
//!
//! A thin wrapper over `birra-http` with a file-backed session, meant for
//! scripting and for poking at a running backend.

mod cli;
mod commands;
mod config;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;
use config::Config;

/// Exit status when the stored session can no longer be refreshed.
const EXIT_SESSION_EXPIRED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let result = match Config::resolve(cli.base_url.as_deref(), cli.session_file.clone()) {
        Ok(config) => commands::handle(cli.command, &config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if session_expired(&e) => {
            output::error("Session expired. Run 'birra login' to sign in again.");
            ExitCode::from(EXIT_SESSION_EXPIRED)
        }
        Err(e) => {
            output::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn session_expired(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<birra_core::Error>()
            .is_some_and(birra_core::Error::is_session_expired)
    })
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr; stdout carries command output only.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

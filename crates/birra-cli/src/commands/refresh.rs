//! Refresh command implementation.

use anyhow::{Context, Result};
use clap::Args;

use birra_core::error::AuthError;
use birra_core::{Error, SessionStore};
use birra_http::RefreshOutcome;

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct RefreshArgs {}

pub async fn run(_args: RefreshArgs, config: &Config) -> Result<()> {
    let current = config
        .store()
        .get()
        .context("Failed to load session")?
        .context("No active session. Run 'birra login' first.")?;

    output::note("Refreshing session...");

    let outcome = config
        .token_client()?
        .refresh(Some(&current))
        .await
        .context("Failed to refresh session")?;

    match outcome {
        RefreshOutcome::Refreshed(_) => {
            output::success("Session refreshed successfully");
            Ok(())
        }
        RefreshOutcome::SessionExpired => Err(Error::Auth(AuthError::SessionExpired).into()),
    }
}

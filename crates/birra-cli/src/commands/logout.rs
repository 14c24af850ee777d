//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, config: &Config) -> Result<()> {
    config
        .token_client()?
        .logout()
        .context("Failed to clear session")?;

    output::success("Logged out");
    Ok(())
}

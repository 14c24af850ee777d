//! Password-reset request command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use birra_core::models::PasswordResetRequest;

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct ResetPassArgs {
    /// Email address of the account
    #[arg(long)]
    pub email: String,
}

pub async fn run(args: ResetPassArgs, config: &Config) -> Result<()> {
    let response = config
        .public_client()?
        .request_password_reset(&PasswordResetRequest { email: args.email })
        .await
        .context("Failed to request password reset")?;

    if !response.is_ok() {
        output::raw_response(&response)?;
        bail!("Password reset rejected with status {}", response.status);
    }

    output::success("Password reset email sent");
    Ok(())
}

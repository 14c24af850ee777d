//! Set-new-password command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use birra_core::models::NewPassword;

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct SetNewPassArgs {
    #[arg(long)]
    pub username: String,

    /// The new password
    #[arg(long, env = "BIRRA_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: SetNewPassArgs, config: &Config) -> Result<()> {
    let response = config
        .public_client()?
        .set_new_password(&NewPassword {
            username: args.username,
            password: args.password,
        })
        .await
        .context("Failed to set new password")?;

    if !response.is_success() {
        output::raw_response(&response)?;
        bail!("New password rejected with status {}", response.status);
    }

    output::success("Password updated. Log in with the new password.");
    Ok(())
}

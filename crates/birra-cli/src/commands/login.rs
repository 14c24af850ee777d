//! Login command implementation.

use anyhow::Result;
use clap::Args;

use birra_core::error::AuthError;
use birra_core::{Credentials, Error};

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account username
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long, env = "BIRRA_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, config: &Config) -> Result<()> {
    let tokens = config.token_client()?;
    let credentials = Credentials::new(&args.username, &args.password);

    output::note("Logging in...");

    match tokens.login(&credentials).await {
        Ok(_) => {}
        Err(e @ Error::Auth(AuthError::InvalidCredentials { .. })) => {
            return Err(anyhow::Error::new(e).context("Username or password incorrect"));
        }
        Err(e) => return Err(anyhow::Error::new(e).context("Failed to login")),
    }

    output::success("Logged in successfully");
    println!();
    output::field("User", &args.username);
    output::field("Backend", config.base.as_str());

    Ok(())
}

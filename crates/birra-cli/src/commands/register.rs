//! Register command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use birra_core::models::NewUser;

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long, env = "BIRRA_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: RegisterArgs, config: &Config) -> Result<()> {
    let user = NewUser {
        username: args.username,
        email: args.email,
        first_name: args.first_name,
        last_name: args.last_name,
        password: args.password,
    };

    let response = config
        .public_client()?
        .register(&user)
        .await
        .context("Failed to register")?;

    if response.status != 201 {
        output::raw_response(&response)?;
        bail!("Registration rejected with status {}", response.status);
    }

    output::success("Account created. Check your email to activate it.");
    Ok(())
}

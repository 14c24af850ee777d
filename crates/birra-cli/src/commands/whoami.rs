//! Whoami command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;

use birra_core::SessionStore;
use birra_http::Resources;

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Also fetch the account profile from the backend
    #[arg(long)]
    pub profile: bool,
}

pub async fn run(args: WhoamiArgs, config: &Config) -> Result<()> {
    let store = config.store();
    if !store.is_authenticated().context("Failed to load session")? {
        bail!("No active session. Run 'birra login' first.");
    }
    let credentials = store
        .credentials()
        .context("Failed to load session")?
        .context("Session has no stored user. Run 'birra login' again.")?;

    output::field("User", credentials.username());
    output::field("Backend", config.base.as_str());
    output::field("Session", &config.session_file.display().to_string());

    if args.profile {
        let api = config.api_client()?;
        let profile = api
            .profile(credentials.username())
            .await
            .context("Failed to fetch profile")?;

        let name = format!("{} {}", profile.fields.first_name, profile.fields.last_name);
        output::field("Name", name.trim());
        output::field("Email", &profile.fields.email);
        output::field("Active", if profile.fields.is_active { "yes" } else { "no" });
    }

    Ok(())
}

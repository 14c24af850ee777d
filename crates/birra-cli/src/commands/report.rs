//! Report command implementation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use birra_http::Resources;

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// First day covered by the report (YYYY-MM-DD)
    #[arg(long = "from")]
    pub date_from: NaiveDate,
}

pub async fn run(args: ReportArgs, config: &Config) -> Result<()> {
    config
        .api_client()?
        .request_report(args.date_from)
        .await
        .context("Failed to request report")?;

    output::success(&format!(
        "Report since {} requested; it will arrive by email",
        args.date_from
    ));
    Ok(())
}

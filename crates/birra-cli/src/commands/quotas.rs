//! Quotas-by-payment command implementation.

use anyhow::{Context, Result};
use clap::Args;

use birra_http::Resources;

use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct QuotasArgs {
    /// Payment primary key
    #[arg(long)]
    pub payment: u64,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: QuotasArgs, config: &Config) -> Result<()> {
    let quotas = config
        .api_client()?
        .quotas_for_payment(args.payment)
        .await
        .context("Failed to list quotas")?;

    if quotas.is_empty() {
        output::note("No quotas for this payment.");
        return Ok(());
    }

    for quota in &quotas {
        output::json_with(quota, args.pretty)?;
    }

    Ok(())
}

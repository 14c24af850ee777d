//! Raw authenticated request.

use anyhow::{Context, Result};
use clap::Args;

use birra_core::{Method, RequestDescriptor};

use crate::commands::read_json;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct CallArgs {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    pub method: String,

    /// Endpoint below the base URL, e.g. /container/5/
    pub endpoint: String,

    /// Inline JSON body
    #[arg(long, alias = "body")]
    pub data: Option<String>,

    /// JSON file with the body (use - for stdin)
    #[arg(long)]
    pub json: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: CallArgs, config: &Config) -> Result<()> {
    let method: Method = args.method.parse().context("Invalid method")?;
    let body = read_json(args.data.as_deref(), args.json.as_deref())?;

    let mut request = RequestDescriptor::new(method, &args.endpoint);
    if let Some(body) = body {
        request = request.with_body(body);
    }

    let response = config
        .api_client()?
        .call(request)
        .await
        .with_context(|| format!("{} {} failed", method, args.endpoint))?;

    output::json_with(&response, args.pretty)
}

//! Typed CRUD over the back-office collections.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand, ValueEnum};

use birra_core::models::{Container, Customer, Flavour, Order, Payment, Product, Quota, Resource};
use birra_http::{ApiClient, Resources};

use crate::commands::read_json;
use crate::config::Config;
use crate::output;

#[derive(Args, Debug)]
pub struct RecordsArgs {
    #[command(subcommand)]
    pub action: RecordAction,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

/// Back-office collections.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Customer,
    Container,
    Flavour,
    Product,
    Order,
    Payment,
    Quota,
}

#[derive(Args, Debug)]
pub struct BodyArgs {
    /// Inline JSON body
    #[arg(long)]
    pub data: Option<String>,

    /// JSON file with the body (use - for stdin)
    #[arg(long)]
    pub json: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum RecordAction {
    /// List every record of a collection
    List { resource: ResourceKind },

    /// Fetch one record
    Get { resource: ResourceKind, pk: u64 },

    /// Create a record from JSON
    Create {
        resource: ResourceKind,
        #[command(flatten)]
        body: BodyArgs,
    },

    /// Apply a partial update from JSON
    Update {
        resource: ResourceKind,
        pk: u64,
        #[command(flatten)]
        body: BodyArgs,
    },

    /// Delete a record
    Delete { resource: ResourceKind, pk: u64 },
}

impl RecordAction {
    fn resource(&self) -> ResourceKind {
        match self {
            RecordAction::List { resource }
            | RecordAction::Get { resource, .. }
            | RecordAction::Create { resource, .. }
            | RecordAction::Update { resource, .. }
            | RecordAction::Delete { resource, .. } => *resource,
        }
    }
}

pub async fn run(args: RecordsArgs, config: &Config) -> Result<()> {
    let api = config.api_client()?;

    match args.action.resource() {
        ResourceKind::Customer => execute::<Customer>(&api, args.action, args.pretty).await,
        ResourceKind::Container => execute::<Container>(&api, args.action, args.pretty).await,
        ResourceKind::Flavour => execute::<Flavour>(&api, args.action, args.pretty).await,
        ResourceKind::Product => execute::<Product>(&api, args.action, args.pretty).await,
        ResourceKind::Order => execute::<Order>(&api, args.action, args.pretty).await,
        ResourceKind::Payment => execute::<Payment>(&api, args.action, args.pretty).await,
        ResourceKind::Quota => execute::<Quota>(&api, args.action, args.pretty).await,
    }
}

async fn execute<R: Resource>(api: &ApiClient, action: RecordAction, pretty: bool) -> Result<()> {
    match action {
        RecordAction::List { .. } => {
            let records: Vec<R> = api.list().await.context("Failed to list records")?;

            if records.is_empty() {
                output::note("No records found.");
                return Ok(());
            }

            for record in &records {
                output::json_with(record, pretty)?;
            }
        }
        RecordAction::Get { pk, .. } => {
            let record: R = api.retrieve(pk).await.context("Failed to fetch record")?;
            output::json_with(&record, pretty)?;
        }
        RecordAction::Create { body, .. } => {
            let value = require_body(&body)?;
            let record: R = serde_json::from_value(value)
                .with_context(|| format!("Invalid record for {}", R::COLLECTION))?;

            let created = api.create(&record).await.context("Failed to create record")?;

            output::json_with(&created, pretty)?;
            if let Some(pk) = created.pk() {
                output::success(&format!("Created record {}{}/", R::COLLECTION, pk));
            }
        }
        RecordAction::Update { pk, body, .. } => {
            let changes = require_body(&body)?;
            let updated: R = api
                .update(pk, changes)
                .await
                .context("Failed to update record")?;
            output::json_with(&updated, pretty)?;
        }
        RecordAction::Delete { pk, .. } => {
            api.destroy::<R>(pk)
                .await
                .context("Failed to delete record")?;
            output::success(&format!("Deleted {}", R::detail_endpoint(pk)));
        }
    }

    Ok(())
}

fn require_body(body: &BodyArgs) -> Result<serde_json::Value> {
    match read_json(body.data.as_deref(), body.json.as_deref())? {
        Some(value) => Ok(value),
        None => bail!("A JSON body is required (--data or --json)"),
    }
}

mod config;
mod context;
mod domain;
mod error;
mod infra;
mod metadata;
mod services;
mod workflow;

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, JIRA_TOKEN_ENV};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::jira::JiraClient;

#[derive(Parser)]
#[command(
    name = "jira-promote",
    version,
    about = "Promotes JIRA tickets from one stage of the release process to the next"
)]
struct Cli {
    /// Base URL of the JIRA instance.
    #[arg(long)]
    jira_url: String,
    /// Promotion to perform: development-to-staging or staging-to-production.
    #[arg(long)]
    promotion_type: String,
    /// JSON file with the metadata of the tickets to promote.
    #[arg(long)]
    metadata_file: PathBuf,
    /// Fetch tickets as usual but only log the changes that would be applied.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(error) = run().await {
        error!("{error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = AppConfig::new(
        cli.jira_url,
        &cli.promotion_type,
        env::var(JIRA_TOKEN_ENV).ok(),
        cli.metadata_file,
        cli.dry_run,
    )?;

    let issue_tracker = Arc::new(JiraClient::new(
        config.jira_base_url.clone(),
        config.jira_token.clone(),
        config.dry_run,
    )?);

    let tickets = metadata::load_tickets(&config.metadata_file)?;
    let context = AppContext::new(config, issue_tracker);

    workflow::promotion::run(&context, tickets).await
}

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fiscaldata_lib::Client;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "fiscaldata")]
#[command(about = "Query US Treasury debt datasets from the Fiscal Data API")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Average interest rates on Treasury securities
    AvgInterest(commands::avg_interest::AvgInterestArgs),
    /// Debt outstanding joined with the statutory debt limit
    DebtLimit(commands::debt_limit::DebtLimitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fiscaldata=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let client = match cli.base_url.as_deref() {
        Some(url) => Client::with_base_url(url),
        None => Client::new(),
    };

    match &cli.command {
        Commands::AvgInterest(args) => commands::avg_interest::run(args, &client, &format).await?,
        Commands::DebtLimit(args) => commands::debt_limit::run(args, &client, &format).await?,
    }

    Ok(())
}

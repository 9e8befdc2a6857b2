use anyhow::Result;
use clap::Args;
use fiscaldata_lib::{average_interest, AvgInterestParams, ClassFilter, Client};

use crate::output::{print_csv, print_json, print_markdown, print_table, OutputFormat};

#[derive(Args)]
pub struct AvgInterestArgs {
    /// Filter by security description (e.g. "Treasury Bonds"), or "all"
    #[arg(long, default_value = "all")]
    pub security_class: String,
}

pub async fn run(args: &AvgInterestArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let params = AvgInterestParams {
        security_class: ClassFilter::parse(&args.security_class),
    };

    let table = average_interest(client, &params).await?;

    eprintln!("{} rows", table.len());

    match format {
        OutputFormat::Table => print_table(&table),
        OutputFormat::Json => print_json(&table),
        OutputFormat::Csv => print_csv(&table)?,
        OutputFormat::Markdown => print_markdown(&table),
    }

    Ok(())
}

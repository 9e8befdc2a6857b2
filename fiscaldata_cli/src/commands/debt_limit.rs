//! The `debt-limit` subcommand: total public debt outstanding joined with
//! the statutory debt limit, one row per shared month-end date.

use anyhow::Result;
use clap::Args;
use fiscaldata_lib::{
    debt_and_debt_limit, ClassFilter, Client, DebtLimitParams, YEAR_COVERAGE_FROM,
    YEAR_COVERAGE_TO,
};

use crate::output::{print_csv, print_json, print_markdown, print_table, OutputFormat};

#[derive(Args)]
pub struct DebtLimitArgs {
    /// Filter by security type: Marketable, Nonmarketable, or "all"
    #[arg(long, default_value = "all")]
    pub security_type: String,

    /// First calendar year to include
    #[arg(long, default_value_t = YEAR_COVERAGE_FROM)]
    pub year_from: i32,

    /// Last calendar year to include
    #[arg(long, default_value_t = YEAR_COVERAGE_TO)]
    pub year_to: i32,

    /// Filter by debt limit class (e.g. "Statutory Debt Limit"), or "all"
    #[arg(long, default_value = "all")]
    pub debt_type: String,
}

pub async fn run(args: &DebtLimitArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let params = DebtLimitParams {
        security_type: ClassFilter::parse(&args.security_type),
        year_from: args.year_from,
        year_to: args.year_to,
        debt_type: ClassFilter::parse(&args.debt_type),
    };

    let table = debt_and_debt_limit(client, &params).await?;

    eprintln!("{} rows", table.len());

    match format {
        OutputFormat::Table => print_table(&table),
        OutputFormat::Json => print_json(&table),
        OutputFormat::Csv => print_csv(&table)?,
        OutputFormat::Markdown => print_markdown(&table),
    }

    Ok(())
}

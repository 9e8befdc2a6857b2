//! The two public dataset pipelines: average interest rates, and total debt
//! joined with the statutory debt limit.

use fiscaldata_api::{Client, DatasetQuery};

use crate::error::FiscalDataError;
use crate::schema::TableSchema;
use crate::table::{build_table, Table};
use crate::validation::{validate_year_range, ClassFilter, YEAR_COVERAGE_FROM, YEAR_COVERAGE_TO};
use crate::value::ColumnType;

/// MSPD table 1 interleaves per-security detail rows with summary rows; only
/// the summaries feed the pivot. The grand-total row carries class `"_"`.
const SUMMARY_SECURITY_CLASSES: &[&str] = &["Total Marketable", "Total Nonmarketable", "_"];

/// MSPD table 2 classes that describe the limit itself rather than the debt
/// counted against it.
const DEBT_LIMIT_CLASSES: &[&str] = &["Statutory Debt Limit", "Balance of Statutory Debt Limit"];

const JOINED_COLUMNS: &[&str] = &[
    "date",
    "total_marketable_mil",
    "total_nonmarketable_mil",
    "total_debt_mil",
    "statutory_debt_limit_mil",
    "balance_of_statutory_debt_limit_mil",
];

/// Parameters for [`average_interest`].
#[derive(Clone, Debug, Default)]
pub struct AvgInterestParams {
    /// Security description to keep, or `All` for every class.
    pub security_class: ClassFilter,
}

/// Parameters for [`debt_and_debt_limit`].
#[derive(Clone, Debug)]
pub struct DebtLimitParams {
    /// Security type to keep on the outstanding-debt side, or `All`.
    pub security_type: ClassFilter,
    /// Inclusive year range; validated against the coverage window before
    /// anything is fetched.
    pub year_from: i32,
    pub year_to: i32,
    /// Debt-limit class to keep, or `All`.
    pub debt_type: ClassFilter,
}

impl Default for DebtLimitParams {
    fn default() -> Self {
        Self {
            security_type: ClassFilter::All,
            year_from: YEAR_COVERAGE_FROM,
            year_to: YEAR_COVERAGE_TO,
            debt_type: ClassFilter::All,
        }
    }
}

/// Average interest rates on Treasury securities.
///
/// Fetches `v2/accounting/od/avg_interest_rates` and returns
/// `[date, security, avg_interest, year]`, one row per (date, security
/// class) observation in response order. Rows whose rate is the service's
/// `"null"` marker are excluded during the build.
pub async fn average_interest(
    client: &Client,
    params: &AvgInterestParams,
) -> Result<Table, FiscalDataError> {
    let raw = client
        .get_avg_interest_rates(&DatasetQuery::default())
        .await?;
    let table = build_table(&raw, &avg_interest_schema())?;
    Ok(apply_class_filter(table, "security", &params.security_class))
}

/// Total public debt outstanding joined with the statutory debt limit, one
/// row per month-end date present in both MSPD tables.
///
/// Returns `[date, total_marketable_mil, total_nonmarketable_mil,
/// total_debt_mil, statutory_debt_limit_mil,
/// balance_of_statutory_debt_limit_mil]`. Dates whose statutory limit is
/// reported as zero (debt-limit suspension periods) are dropped before the
/// join, so they vanish from the result entirely.
///
/// The two fetches are sequential and independent; the service gives no
/// transactional guarantee that both tables reflect the same publication
/// run.
///
/// Narrowing `security_type` or `debt_type` changes the pivot column count,
/// so the positional rename fails with `ColumnCountMismatch` rather than
/// mislabeling columns.
pub async fn debt_and_debt_limit(
    client: &Client,
    params: &DebtLimitParams,
) -> Result<Table, FiscalDataError> {
    let (year_from, year_to) = validate_year_range(params.year_from, params.year_to)?;
    let in_range = move |year: Option<i32>| {
        year.map(|y| (year_from..=year_to).contains(&y))
            .unwrap_or(false)
    };

    let raw = client.get_debt_outstanding(&DatasetQuery::default()).await?;
    let outstanding = build_table(&raw, &outstanding_schema())?
        .filter_rows(|row| {
            row.text("security_class")
                .map(|class| SUMMARY_SECURITY_CLASSES.contains(&class))
                .unwrap_or(false)
        })
        .filter_rows(|row| in_range(row.year("year")));
    let outstanding = apply_class_filter(outstanding, "security_type", &params.security_type)
        .select_columns(&["date", "security_type", "total_mil"])?
        .pivot_wider("date", "security_type", "total_mil")?;

    let raw = client.get_debt_limit(&DatasetQuery::default()).await?;
    let limit = build_table(&raw, &debt_limit_schema())?
        .filter_rows(|row| {
            row.text("debt_class")
                .map(|class| DEBT_LIMIT_CLASSES.contains(&class))
                .unwrap_or(false)
        })
        .filter_rows(|row| in_range(row.year("year")))
        // A zero limit marks a suspension period: a data gap, not a value.
        .filter_rows(|row| row.amount("total_mil") != Some(0.0));
    let limit = apply_class_filter(limit, "debt_class", &params.debt_type)
        .select_columns(&["date", "debt_class", "total_mil"])?
        .pivot_wider("date", "debt_class", "total_mil")?;

    outstanding.inner_join(&limit, "date", JOINED_COLUMNS)
}

fn avg_interest_schema() -> TableSchema {
    TableSchema::new()
        .column("record_date", "date", ColumnType::Date)
        .column("security_desc", "security", ColumnType::Text)
        .column("avg_interest_rate_amt", "avg_interest", ColumnType::Amount)
        .column("record_calendar_year", "year", ColumnType::Year)
}

fn outstanding_schema() -> TableSchema {
    TableSchema::new()
        .column("record_date", "date", ColumnType::Date)
        .column("security_type_desc", "security_type", ColumnType::Text)
        .column("security_class_desc", "security_class", ColumnType::Text)
        .column("total_mil_amt", "total_mil", ColumnType::Amount)
        .column("record_calendar_year", "year", ColumnType::Year)
}

fn debt_limit_schema() -> TableSchema {
    TableSchema::new()
        .column("record_date", "date", ColumnType::Date)
        .column("debt_limit_class1_desc", "debt_class", ColumnType::Text)
        .column("total_mil_amt", "total_mil", ColumnType::Amount)
        .column("record_calendar_year", "year", ColumnType::Year)
}

/// `All` is the identity; `Only` keeps exact matches on `column`.
fn apply_class_filter(table: Table, column: &str, filter: &ClassFilter) -> Table {
    if matches!(filter, ClassFilter::All) {
        return table;
    }
    table.filter_rows(|row| {
        row.text(column)
            .map(|value| filter.matches(value))
            .unwrap_or(false)
    })
}

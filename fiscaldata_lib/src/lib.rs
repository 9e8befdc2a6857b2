//! Library layer for the Treasury Fiscal Data client: typed tables, the
//! shaping operations over them, and the two public dataset pipelines.
//!
//! Wraps the `fiscaldata_api` transport crate with schema-driven table
//! building, filter/select/pivot/join operations, and input validation.

pub mod datasets;
pub mod error;
pub mod schema;
pub mod table;
pub mod validation;
pub mod value;

pub use fiscaldata_api;
pub use fiscaldata_api::types;
pub use fiscaldata_api::{
    Client, DatasetQuery, FieldFilter, FilterOp, Query, SortDirection, SortKey,
};

pub use datasets::{average_interest, debt_and_debt_limit, AvgInterestParams, DebtLimitParams};
pub use error::FiscalDataError;
pub use schema::{ColumnSpec, TableSchema};
pub use table::{build_table, Row, Table};
pub use validation::{validate_year_range, ClassFilter, YEAR_COVERAGE_FROM, YEAR_COVERAGE_TO};
pub use value::{ColumnType, Value};

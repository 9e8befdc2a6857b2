//! Error type for the shaping layer.
//!
//! Transport failures stay in `fiscaldata_api::Error`; everything that can go
//! wrong between a raw response body and a finished table is collected here.

use std::fmt;

/// Errors produced by the shaping layer, wrapping transport errors from the
/// API client and adding payload decoding and table-operation failures.
#[derive(Debug)]
pub enum FiscalDataError {
    /// Transport-layer failure (connection, timeout, HTTP status, empty body).
    Api(fiscaldata_api::Error),
    /// The body is not JSON, or the top-level `data` key is absent or not an
    /// array.
    MalformedPayload(String),
    /// A raw field could not be coerced into its declared column type.
    TypeCoercion {
        column: String,
        value: String,
        expected: &'static str,
    },
    /// A caller-supplied year range falls outside the dataset's coverage
    /// window.
    Range { from: i32, to: i32, reason: String },
    /// A (key, category) pair occurs more than once where uniqueness is
    /// required (pivoting, join keys).
    DuplicateKey { key: String, category: String },
    /// A positional rename list does not match the table's column count.
    ColumnCountMismatch { columns: usize, names: usize },
    /// A column name not present in the table.
    UnknownColumn(String),
    /// Operation misuse, such as pivoting on a non-hashable key column.
    InvalidInput(String),
}

impl fmt::Display for FiscalDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FiscalDataError::Api(e) => write!(f, "API error: {}", e),
            FiscalDataError::MalformedPayload(msg) => {
                write!(f, "Malformed payload: {}", msg)
            }
            FiscalDataError::TypeCoercion {
                column,
                value,
                expected,
            } => write!(
                f,
                "Cannot coerce {:?} in column '{}': expected {}",
                value, column, expected
            ),
            FiscalDataError::Range { from, to, reason } => {
                write!(f, "Invalid year range {}..={}: {}", from, to, reason)
            }
            FiscalDataError::DuplicateKey { key, category } => {
                write!(f, "Duplicate key ({}, {})", key, category)
            }
            FiscalDataError::ColumnCountMismatch { columns, names } => write!(
                f,
                "Rename list has {} names but the table has {} columns",
                names, columns
            ),
            FiscalDataError::UnknownColumn(name) => {
                write!(f, "Unknown column: {}", name)
            }
            FiscalDataError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for FiscalDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FiscalDataError::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<fiscaldata_api::Error> for FiscalDataError {
    fn from(e: fiscaldata_api::Error) -> Self {
        FiscalDataError::Api(e)
    }
}

impl From<serde_json::Error> for FiscalDataError {
    fn from(e: serde_json::Error) -> Self {
        FiscalDataError::MalformedPayload(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = FiscalDataError::TypeCoercion {
            column: "avg_interest".to_string(),
            value: "eight".to_string(),
            expected: "a numeric amount",
        };
        assert_eq!(
            err.to_string(),
            "Cannot coerce \"eight\" in column 'avg_interest': expected a numeric amount"
        );

        let err = FiscalDataError::Range {
            from: 1999,
            to: 2023,
            reason: "coverage starts in 2001".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid year range 1999..=2023: coverage starts in 2001"
        );

        let err = FiscalDataError::ColumnCountMismatch {
            columns: 6,
            names: 4,
        };
        assert_eq!(
            err.to_string(),
            "Rename list has 4 names but the table has 6 columns"
        );
    }

    #[test]
    fn test_api_error_is_source() {
        use std::error::Error as _;

        let err = FiscalDataError::from(fiscaldata_api::Error::EmptyResponse);
        assert!(matches!(err, FiscalDataError::Api(_)));
        assert!(err.source().is_some());

        let err = FiscalDataError::UnknownColumn("security".to_string());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_serde_error_becomes_malformed_payload() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = FiscalDataError::from(parse_err);
        assert!(matches!(err, FiscalDataError::MalformedPayload(_)));
    }
}

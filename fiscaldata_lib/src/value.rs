//! Typed cell values and the decode step from raw API strings.

use chrono::NaiveDate;

/// Column types declared by a table schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnType {
    /// Calendar date in `YYYY-MM-DD` format.
    Date,
    /// Categorical or free-form text.
    Text,
    /// Monetary or interest amount. The service marks a missing observation
    /// with the literal string `"null"`.
    Amount,
    /// Calendar year.
    Year,
}

impl ColumnType {
    /// Whether a record may omit this field without being counted as
    /// damaged. Amount fields are the known-nullable class.
    pub fn is_nullable(self) -> bool {
        matches!(self, ColumnType::Amount)
    }

    /// Decodes one raw field into a typed value.
    ///
    /// Returns `Ok(None)` only for an `Amount` field holding the service's
    /// `"null"` marker, which callers treat as "exclude this row" rather than
    /// as zero or as a parse failure. Any other undecodable input is a
    /// coercion failure described by the returned `expected` string.
    pub fn decode(self, raw: &str) -> Result<Option<Value>, &'static str> {
        match self {
            ColumnType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|d| Some(Value::Date(d)))
                .map_err(|_| "a date in YYYY-MM-DD format"),
            ColumnType::Text => Ok(Some(Value::Text(raw.to_string()))),
            ColumnType::Amount => {
                if raw == "null" {
                    Ok(None)
                } else {
                    raw.parse::<f64>()
                        .map(|v| Some(Value::Amount(v)))
                        .map_err(|_| "a numeric amount")
                }
            }
            ColumnType::Year => raw
                .parse::<i32>()
                .map(|y| Some(Value::Year(y)))
                .map_err(|_| "a four-digit year"),
        }
    }
}

/// One typed table cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Date(NaiveDate),
    Text(String),
    Amount(f64),
    Year(i32),
    /// Explicit marker for a (key, category) pair absent after pivoting.
    Missing,
}

impl Value {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
    pub fn as_amount(&self) -> Option<f64> {
        match self {
            Value::Amount(v) => Some(*v),
            _ => None,
        }
    }
    pub fn as_year(&self) -> Option<i32> {
        match self {
            Value::Year(y) => Some(*y),
            _ => None,
        }
    }
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// JSON rendition: dates as `YYYY-MM-DD` strings, amounts and years as
    /// numbers, missing as `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Amount(v) => serde_json::json!(v),
            Value::Year(y) => serde_json::json!(y),
            Value::Missing => serde_json::Value::Null,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Text(s) => write!(f, "{}", s),
            Value::Amount(v) => write!(f, "{}", v),
            Value::Year(y) => write!(f, "{}", y),
            Value::Missing => Ok(()),
        }
    }
}

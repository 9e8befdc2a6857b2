//! Column schemas mapping raw API field names onto typed table columns.
//!
//! A schema is an ordered list of (source field, target column, type)
//! entries. Order matters: it fixes the column order of the built table.

use crate::value::ColumnType;

/// One schema entry.
#[derive(Clone, Debug)]
pub struct ColumnSpec {
    /// Field name as it appears in the API record.
    pub source: String,
    /// Column name in the built table.
    pub target: String,
    pub ty: ColumnType,
}

/// Ordered mapping from raw record fields to typed table columns.
#[derive(Clone, Debug, Default)]
pub struct TableSchema {
    columns: Vec<ColumnSpec>,
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column to the schema.
    ///
    /// # Arguments
    /// * `source` - Field name in the raw API record
    /// * `target` - Column name in the built table
    /// * `ty` - Type the raw string value is decoded into
    pub fn column(mut self, source: &str, target: &str, ty: ColumnType) -> Self {
        self.columns.push(ColumnSpec {
            source: source.to_string(),
            target: target.to_string(),
            ty,
        });
        self
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Target column names in schema order.
    pub fn target_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.target.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_preserves_declaration_order() {
        let schema = TableSchema::new()
            .column("record_date", "date", ColumnType::Date)
            .column("security_desc", "security", ColumnType::Text)
            .column("avg_interest_rate_amt", "avg_interest", ColumnType::Amount)
            .column("record_calendar_year", "year", ColumnType::Year);

        assert_eq!(
            schema.target_names(),
            vec!["date", "security", "avg_interest", "year"]
        );
        assert_eq!(schema.columns()[0].source, "record_date");
        assert_eq!(schema.columns()[2].ty, ColumnType::Amount);
    }

    #[test]
    fn test_empty_schema() {
        let schema = TableSchema::new();
        assert!(schema.columns().is_empty());
        assert!(schema.target_names().is_empty());
    }
}

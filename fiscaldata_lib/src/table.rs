//! The Table type and the shaping operations over it.
//!
//! A table is an ordered list of rows, each row a fixed-arity sequence of
//! typed values positionally matched to the column names. Row order follows
//! API response order; nothing here sorts.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use fiscaldata_api::{PaginatedResponse, RawRecord};
use serde_json::Value as JsonValue;

use crate::error::FiscalDataError;
use crate::schema::TableSchema;
use crate::value::Value;

/// An in-memory typed table.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// A borrowed view of one table row with by-name access.
#[derive(Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    cells: &'a [Value],
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        let index = self.table.columns.iter().position(|c| c == column)?;
        self.cells.get(index)
    }

    pub fn text(&self, column: &str) -> Option<&'a str> {
        self.get(column)?.as_text()
    }

    pub fn date(&self, column: &str) -> Option<NaiveDate> {
        self.get(column)?.as_date()
    }

    pub fn amount(&self, column: &str) -> Option<f64> {
        self.get(column)?.as_amount()
    }

    pub fn year(&self, column: &str) -> Option<i32> {
        self.get(column)?.as_year()
    }

    pub fn values(&self) -> &'a [Value] {
        self.cells
    }
}

/// Parses a raw response body into a `Table` according to `schema`.
///
/// The body must be the service envelope with a top-level `data` array of
/// flat string-valued records; anything else fails with `MalformedPayload`.
/// Only the schema's source fields are projected, in schema order, under the
/// schema's target names.
///
/// Row exclusion rules:
/// * an `Amount` field holding the literal string `"null"` drops the row
///   silently (the service's marker for a missing observation);
/// * a record missing a nullable field entirely is dropped silently;
/// * a record missing a required field is dropped and the total count of such
///   drops is logged at `warn`.
///
/// Any other undecodable field fails the whole call with `TypeCoercion`.
pub fn build_table(raw: &str, schema: &TableSchema) -> Result<Table, FiscalDataError> {
    let page: PaginatedResponse<RawRecord> = serde_json::from_str(raw)?;

    if let Some(meta) = &page.meta {
        if meta.total_pages > 1 {
            tracing::warn!(
                "dataset spans {} pages but only page 1 was fetched; results are truncated",
                meta.total_pages
            );
        }
    }

    let mut rows = Vec::with_capacity(page.data.len());
    let mut dropped_incomplete = 0usize;

    'records: for record in &page.data {
        let mut row = Vec::with_capacity(schema.columns().len());
        for spec in schema.columns() {
            let raw_value = match record.get(&spec.source) {
                Some(JsonValue::String(s)) => s.as_str(),
                Some(JsonValue::Null) | None => {
                    if !spec.ty.is_nullable() {
                        dropped_incomplete += 1;
                    }
                    continue 'records;
                }
                Some(other) => {
                    return Err(FiscalDataError::TypeCoercion {
                        column: spec.target.clone(),
                        value: other.to_string(),
                        expected: "a JSON string",
                    });
                }
            };
            match spec.ty.decode(raw_value) {
                Ok(Some(value)) => row.push(value),
                // "null" amount: the whole row is excluded.
                Ok(None) => continue 'records,
                Err(expected) => {
                    return Err(FiscalDataError::TypeCoercion {
                        column: spec.target.clone(),
                        value: raw_value.to_string(),
                        expected,
                    });
                }
            }
        }
        rows.push(row);
    }

    if dropped_incomplete > 0 {
        tracing::warn!(
            "dropped {} record(s) missing a required field",
            dropped_incomplete
        );
    }

    Ok(Table {
        columns: schema.target_names(),
        rows,
    })
}

impl Table {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row { table: self, cells })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows.iter().map(|cells| Row {
            table: self,
            cells,
        })
    }

    fn column_index(&self, name: &str) -> Result<usize, FiscalDataError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| FiscalDataError::UnknownColumn(name.to_string()))
    }

    /// Keeps only the rows the predicate accepts. Row order is preserved and
    /// the column set is untouched.
    pub fn filter_rows<P>(&self, predicate: P) -> Table
    where
        P: Fn(&Row<'_>) -> bool,
    {
        let mut rows = Vec::new();
        for cells in &self.rows {
            let row = Row {
                table: self,
                cells: cells.as_slice(),
            };
            if predicate(&row) {
                rows.push(cells.clone());
            }
        }
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Projects the table onto `names`, in the order given.
    ///
    /// Fails with `UnknownColumn` if any name is not a column of the table.
    pub fn select_columns(&self, names: &[&str]) -> Result<Table, FiscalDataError> {
        let indices = names
            .iter()
            .map(|name| self.column_index(name))
            .collect::<Result<Vec<_>, _>>()?;
        let rows = self
            .rows
            .iter()
            .map(|cells| indices.iter().map(|&i| cells[i].clone()).collect())
            .collect();
        Ok(Table {
            columns: names.iter().map(|n| n.to_string()).collect(),
            rows,
        })
    }

    /// Pivots a long table into a wide one: one output row per distinct
    /// `key` value, one output column per distinct `category` value, cells
    /// taken from `value`.
    ///
    /// Key and category order are both first-seen order. A (key, category)
    /// pair absent from the input yields `Value::Missing`. A pair present
    /// more than once fails with `DuplicateKey`; the aggregation would be
    /// ambiguous and no winner is ever picked silently.
    pub fn pivot_wider(
        &self,
        key: &str,
        category: &str,
        value: &str,
    ) -> Result<Table, FiscalDataError> {
        let key_index = self.column_index(key)?;
        let category_index = self.column_index(category)?;
        let value_index = self.column_index(value)?;

        let mut categories: Vec<String> = Vec::new();
        let mut keys: Vec<(KeyValue, Value)> = Vec::new();
        let mut seen_keys: HashSet<KeyValue> = HashSet::new();
        let mut cells: HashMap<(KeyValue, String), Value> = HashMap::new();

        for row in &self.rows {
            let key_cell = &row[key_index];
            let key_value = hash_key(key_cell, key)?;
            let category_name = match &row[category_index] {
                Value::Text(s) => s.clone(),
                other => {
                    return Err(FiscalDataError::InvalidInput(format!(
                        "pivot category column '{}' must hold text, found {:?}",
                        category, other
                    )));
                }
            };

            if !categories.contains(&category_name) {
                categories.push(category_name.clone());
            }
            if seen_keys.insert(key_value.clone()) {
                keys.push((key_value.clone(), key_cell.clone()));
            }

            let slot = (key_value, category_name);
            if cells.contains_key(&slot) {
                return Err(FiscalDataError::DuplicateKey {
                    key: key_cell.to_string(),
                    category: slot.1,
                });
            }
            cells.insert(slot, row[value_index].clone());
        }

        let mut columns = Vec::with_capacity(categories.len() + 1);
        columns.push(key.to_string());
        columns.extend(categories.iter().cloned());

        let mut rows = Vec::with_capacity(keys.len());
        for (key_value, key_cell) in keys {
            let mut out = Vec::with_capacity(columns.len());
            out.push(key_cell);
            for category_name in &categories {
                let slot = (key_value.clone(), category_name.clone());
                out.push(cells.remove(&slot).unwrap_or(Value::Missing));
            }
            rows.push(out);
        }

        Ok(Table { columns, rows })
    }

    /// Replaces all column names positionally.
    ///
    /// Fails with `ColumnCountMismatch` unless `names` has exactly one entry
    /// per column.
    pub fn rename(&self, names: &[&str]) -> Result<Table, FiscalDataError> {
        if names.len() != self.columns.len() {
            return Err(FiscalDataError::ColumnCountMismatch {
                columns: self.columns.len(),
                names: names.len(),
            });
        }
        Ok(Table {
            columns: names.iter().map(|n| n.to_string()).collect(),
            rows: self.rows.clone(),
        })
    }

    /// Inner-joins two tables on the `on` column and renames the result
    /// positionally to `rename_to`.
    ///
    /// Only keys present in both sides survive; a key on one side only is
    /// dropped entirely, never padded. Left row order is preserved. Both
    /// inputs must have unique keys (pivot outputs do by construction);
    /// a duplicate on either side fails with `DuplicateKey` rather than
    /// multiplying rows. `rename_to` must cover the key column plus every
    /// non-key column of both sides, or the call fails with
    /// `ColumnCountMismatch`.
    pub fn inner_join(
        &self,
        right: &Table,
        on: &str,
        rename_to: &[&str],
    ) -> Result<Table, FiscalDataError> {
        let left_key = self.column_index(on)?;
        let right_key = right.column_index(on)?;

        let mut right_rows: HashMap<KeyValue, &Vec<Value>> = HashMap::new();
        for cells in &right.rows {
            let key_value = hash_key(&cells[right_key], on)?;
            if right_rows.insert(key_value, cells).is_some() {
                return Err(FiscalDataError::DuplicateKey {
                    key: cells[right_key].to_string(),
                    category: on.to_string(),
                });
            }
        }

        let mut columns = self.columns.clone();
        for (i, name) in right.columns.iter().enumerate() {
            if i != right_key {
                columns.push(name.clone());
            }
        }

        let mut seen_left: HashSet<KeyValue> = HashSet::new();
        let mut rows = Vec::new();
        for cells in &self.rows {
            let key_value = hash_key(&cells[left_key], on)?;
            if !seen_left.insert(key_value.clone()) {
                return Err(FiscalDataError::DuplicateKey {
                    key: cells[left_key].to_string(),
                    category: on.to_string(),
                });
            }
            if let Some(matched) = right_rows.get(&key_value) {
                let mut out = cells.clone();
                for (i, value) in matched.iter().enumerate() {
                    if i != right_key {
                        out.push(value.clone());
                    }
                }
                rows.push(out);
            }
        }

        Table { columns, rows }.rename(rename_to)
    }

    /// Renders the table as a JSON array of row objects.
    pub fn to_json(&self) -> JsonValue {
        let rows = self
            .rows
            .iter()
            .map(|cells| {
                let mut object = serde_json::Map::new();
                for (name, value) in self.columns.iter().zip(cells) {
                    object.insert(name.clone(), value.to_json());
                }
                JsonValue::Object(object)
            })
            .collect();
        JsonValue::Array(rows)
    }
}

/// Hashable rendition of a key cell. Amounts are deliberately absent: a
/// float makes no sense as a grouping or join key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum KeyValue {
    Date(NaiveDate),
    Text(String),
    Year(i32),
}

fn hash_key(cell: &Value, column: &str) -> Result<KeyValue, FiscalDataError> {
    match cell {
        Value::Date(d) => Ok(KeyValue::Date(*d)),
        Value::Text(s) => Ok(KeyValue::Text(s.clone())),
        Value::Year(y) => Ok(KeyValue::Year(*y)),
        other => Err(FiscalDataError::InvalidInput(format!(
            "column '{}' cannot be used as a key, found {:?}",
            column, other
        ))),
    }
}

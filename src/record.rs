use crate::error::{Result, ScrubError};
use crate::normalize::CellError;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// A single cell value. The schema is loose on purpose: sources hand over
/// whatever the spreadsheet held, and the normalizers tighten types field
/// by field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Value {
    /// A missing/blank cell.
    Empty,
    Int(i64),
    Date(NaiveDate),
    Text(String),
}

impl Value {
    /// True for cells a migration target would consider missing.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Int(n) => write!(f, "{}", n),
            // Month-first fallback; the pipeline canonicalizes date cells to
            // Text before output, so this rendering only shows up in logs.
            Value::Date(d) => write!(f, "{}", d.format("%m/%d/%Y")),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// An ordered, in-memory set of records sharing one fixed column list.
///
/// Every pipeline stage operates on this store in place. Rows keep their
/// relative order through every operation; columns are looked up by name.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RecordSet {
    /// Builds a record set, rejecting ragged rows and duplicated column
    /// names (either would make later lookups ambiguous).
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(ScrubError::Load(format!("duplicate column '{}'", column)));
            }
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(ScrubError::Load(format!(
                    "record {} has {} fields, expected {}",
                    i + 1,
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of a column that must exist.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| ScrubError::SchemaMismatch(name.to_string()))
    }

    /// Cell accessor, mainly for the verifier and tests.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Removes records that are exact duplicates across every field,
    /// keeping the first occurrence. Surviving rows stay in order.
    pub fn deduplicate(&mut self) {
        let before = self.rows.len();
        let mut seen: HashSet<Vec<Value>> = HashSet::with_capacity(before);
        self.rows.retain(|row| seen.insert(row.clone()));
        debug!(before, after = self.rows.len(), "deduplicated records");
    }

    /// Removes records whose values in `key_fields` match an earlier
    /// record, keeping the first occurrence. The all-fields `deduplicate`
    /// is the stock behavior; this variant serves callers that key on an
    /// identifying subset such as an external ID column.
    pub fn deduplicate_by(&mut self, key_fields: &[String]) -> Result<()> {
        let indices: Vec<usize> = key_fields
            .iter()
            .map(|f| self.require_column(f))
            .collect::<Result<_>>()?;
        let before = self.rows.len();
        let mut seen: HashSet<Vec<Value>> = HashSet::with_capacity(before);
        self.rows.retain(|row| {
            let key: Vec<Value> = indices.iter().map(|&i| row[i].clone()).collect();
            seen.insert(key)
        });
        debug!(before, after = self.rows.len(), ?key_fields, "deduplicated records by key");
        Ok(())
    }

    /// Applies a renaming function to every column name uniformly. The
    /// mapping must be collision-free over the column set.
    pub fn rename_columns(&mut self, mapper: impl Fn(&str) -> String) -> Result<()> {
        let renamed: Vec<String> = self.columns.iter().map(|c| mapper(c)).collect();
        let mut seen = HashSet::new();
        for name in &renamed {
            if !seen.insert(name.as_str()) {
                return Err(ScrubError::RenameCollision(name.clone()));
            }
        }
        self.columns = renamed;
        Ok(())
    }

    /// Rewrites one column through a fallible cell mapper, row by row. The
    /// first cell failure aborts the whole operation, carrying the column
    /// name and the 1-based record position.
    pub fn map_column<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: Fn(&Value) -> std::result::Result<Value, CellError>,
    {
        let idx = self.require_column(name)?;
        for (row_idx, row) in self.rows.iter_mut().enumerate() {
            match f(&row[idx]) {
                Ok(value) => row[idx] = value,
                Err(cell) => return Err(cell.into_scrub(name, row_idx + 1)),
            }
        }
        Ok(())
    }

    /// Adds (or overwrites) one integer column numbered 1..=len in current
    /// row order.
    ///
    /// The ID is purely positional: after deduplication it reflects
    /// post-dedup order, not original row numbers, and it is local to this
    /// migration run. Check it for collisions against any pre-existing
    /// target-system IDs before importing downstream.
    pub fn assign_sequential(&mut self, name: &str) {
        match self.column_index(name) {
            Some(idx) => {
                for (i, row) in self.rows.iter_mut().enumerate() {
                    row[idx] = Value::Int((i + 1) as i64);
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (i, row) in self.rows.iter_mut().enumerate() {
                    row.push(Value::Int((i + 1) as i64));
                }
            }
        }
    }
}

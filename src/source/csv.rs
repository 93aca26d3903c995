use super::RecordSource;
use crate::error::Result;
use crate::record::{RecordSet, Value};
use csv::{ReaderBuilder, Trim};
use std::path::PathBuf;
use tracing::info;

/// Reads records from a CSV file with a header row. Fields are
/// whitespace-trimmed; empty fields become `Value::Empty`. Everything else
/// stays text — dates arrive as strings and are left for the date
/// normalizer to interpret.
#[derive(Debug)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for CsvSource {
    fn load(&self) -> Result<RecordSet> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_path(&self.path)?;

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|field| {
                        if field.is_empty() {
                            Value::Empty
                        } else {
                            Value::Text(field.to_string())
                        }
                    })
                    .collect(),
            );
        }

        info!(path = %self.path.display(), rows = rows.len(), "loaded CSV input");
        RecordSet::from_rows(columns, rows)
    }
}

use super::RecordSource;
use crate::error::{Result, ScrubError};
use crate::record::{RecordSet, Value};
use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use std::path::PathBuf;
use tracing::info;

/// Reads records from the first worksheet of an XLSX workbook. The first
/// row is the header. Date-formatted cells come through as structured
/// dates, so spreadsheet-native birth dates skip text parsing entirely;
/// everything else maps to text, integers, or empty.
#[derive(Debug)]
pub struct XlsxSource {
    path: PathBuf,
}

impl XlsxSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for XlsxSource {
    fn load(&self) -> Result<RecordSet> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| {
                ScrubError::Load(format!("no worksheet found in {}", self.path.display()))
            })??;

        let mut sheet_rows = range.rows();
        let header = sheet_rows.next().ok_or_else(|| {
            ScrubError::Load(format!("{} has no header row", self.path.display()))
        })?;
        let columns: Vec<String> = header.iter().map(header_text).collect();

        let rows: Vec<Vec<Value>> = sheet_rows
            .map(|row| row.iter().map(cell_value).collect())
            .collect();

        info!(path = %self.path.display(), rows = rows.len(), "loaded XLSX input");
        RecordSet::from_rows(columns, rows)
    }
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Empty,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Value::Empty
            } else {
                Value::Text(trimmed.to_string())
            }
        }
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) if f.fract() == 0.0 => Value::Int(*f as i64),
        Data::Float(f) => Value::Text(f.to_string()),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_datetime()
            .map(|dt| Value::Date(dt.date()))
            .unwrap_or(Value::Empty),
        Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Bool(b) => Value::Text(b.to_string()),
        Data::Error(_) => Value::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_errors() {
        let source = XlsxSource::new("/definitely/not/here.xlsx");
        assert!(source.load().is_err());
    }

    #[test]
    fn test_text_cells_are_trimmed() {
        assert_eq!(
            cell_value(&Data::String("  ada  ".to_string())),
            Value::Text("ada".to_string())
        );
        assert_eq!(cell_value(&Data::String("   ".to_string())), Value::Empty);
    }

    #[test]
    fn test_numeric_cells() {
        assert_eq!(cell_value(&Data::Int(42)), Value::Int(42));
        // Excel stores most numbers as floats; whole ones come back as ints
        assert_eq!(cell_value(&Data::Float(42.0)), Value::Int(42));
        assert_eq!(
            cell_value(&Data::Float(2.5)),
            Value::Text("2.5".to_string())
        );
    }

    #[test]
    fn test_blank_and_error_cells_are_empty() {
        assert_eq!(cell_value(&Data::Empty), Value::Empty);
        assert_eq!(
            cell_value(&Data::Error(calamine::CellErrorType::NA)),
            Value::Empty
        );
    }

    #[test]
    fn test_bool_cell_becomes_text() {
        assert_eq!(
            cell_value(&Data::Bool(true)),
            Value::Text("true".to_string())
        );
    }

    #[test]
    fn test_header_text_from_string_cell() {
        assert_eq!(header_text(&Data::String(" First Name ".to_string())), "First Name");
        assert_eq!(header_text(&Data::Int(7)), "7");
    }
}

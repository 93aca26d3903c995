use crate::error::{Result, ScrubError};
use crate::record::RecordSet;
use std::path::Path;

mod csv;
mod xlsx;

pub use self::csv::CsvSource;
pub use self::xlsx::XlsxSource;

/// A tabular input the pipeline can read records from. Adapters own the
/// format details; the pipeline only ever sees a `RecordSet`.
pub trait RecordSource: std::fmt::Debug {
    fn load(&self) -> Result<RecordSet>;
}

/// Picks a source adapter from the file extension.
pub fn open(path: &Path) -> Result<Box<dyn RecordSource>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match extension.as_deref() {
        Some("csv") => Ok(Box::new(CsvSource::new(path))),
        Some("xlsx") | Some("xlsm") => Ok(Box::new(XlsxSource::new(path))),
        _ => Err(ScrubError::Load(format!(
            "unsupported input format: {} (expected .csv or .xlsx)",
            path.display()
        ))),
    }
}

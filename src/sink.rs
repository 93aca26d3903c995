use crate::error::Result;
use crate::record::RecordSet;
use csv::Writer;
use std::fs;
use std::path::Path;
use tracing::info;

/// Writes the final record set as CSV with a header row. Values are
/// rendered through their display form, so dates and IDs come out exactly
/// as the pipeline canonicalized them and empty cells stay empty.
pub fn write_csv(records: &RecordSet, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = Writer::from_path(path)?;
    writer.write_record(records.columns())?;
    for row in records.rows() {
        writer.write_record(row.iter().map(|value| value.to_string()))?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = records.len(), "wrote output CSV");
    Ok(())
}

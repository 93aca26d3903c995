use crate::record::RecordSet;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, instrument, warn};

/// Result of one verification check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    Pass,
    Warning { count: usize },
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, CheckOutcome::Pass)
    }

    fn from_count(count: usize) -> Self {
        if count == 0 {
            CheckOutcome::Pass
        } else {
            CheckOutcome::Warning { count }
        }
    }
}

/// Post-run report over the finalized record set. Warnings flag output
/// worth a second look before it is handed to the importer; they do not
/// fail the run. Serializes to JSON for programmatic consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub duplicate_rows: CheckOutcome,
    pub duplicate_ids: CheckOutcome,
    pub missing_values: CheckOutcome,
}

impl VerificationReport {
    pub fn all_passed(&self) -> bool {
        self.duplicate_rows.passed() && self.duplicate_ids.passed() && self.missing_values.passed()
    }

    /// Human-readable rendering, one line per check.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(3);
        lines.push(match self.duplicate_rows {
            CheckOutcome::Pass => "[PASS] No duplicated rows detected in output.".to_string(),
            CheckOutcome::Warning { count } => format!(
                "[WARNING] {count} duplicate rows detected. Double check the output file for duplications."
            ),
        });
        lines.push(match self.duplicate_ids {
            CheckOutcome::Pass => "[PASS] No duplicated record IDs detected in output.".to_string(),
            CheckOutcome::Warning { count } => format!(
                "[WARNING] {count} duplicate record IDs detected. Double check the output file for duplicated ID values."
            ),
        });
        lines.push(match self.missing_values {
            CheckOutcome::Pass => "[PASS] No missing values detected in output data.".to_string(),
            CheckOutcome::Warning { count } => format!(
                "[WARNING] {count} missing values detected. Double check the output file for missing values."
            ),
        });
        lines
    }
}

/// Runs the three checks over a finalized record set. All three always
/// run; none mutates the data. A missing ID column counts as a vacuous
/// pass on the ID check, so callers that care should require the column
/// before verifying.
#[instrument(skip(records))]
pub fn verify(records: &RecordSet, id_column: &str) -> VerificationReport {
    let mut seen_rows = HashSet::new();
    let duplicate_rows = records
        .rows()
        .iter()
        .filter(|row| !seen_rows.insert(*row))
        .count();

    let duplicate_ids = match records.column_index(id_column) {
        Some(idx) => {
            let mut seen_ids = HashSet::new();
            records
                .rows()
                .iter()
                .filter(|row| !seen_ids.insert(&row[idx]))
                .count()
        }
        None => 0,
    };

    let missing_values = records
        .rows()
        .iter()
        .flat_map(|row| row.iter())
        .filter(|value| value.is_empty())
        .count();

    let report = VerificationReport {
        duplicate_rows: CheckOutcome::from_count(duplicate_rows),
        duplicate_ids: CheckOutcome::from_count(duplicate_ids),
        missing_values: CheckOutcome::from_count(missing_values),
    };
    if report.all_passed() {
        info!("verification passed all checks");
    } else {
        warn!(
            duplicate_rows,
            duplicate_ids, missing_values, "verification raised warnings"
        );
    }
    report
}

pub mod assignment;
pub mod date;
pub mod name;

pub use assignment::AssignmentMap;
pub use date::DateNormalizer;
pub use name::normalize_name;

use crate::error::ScrubError;

/// Cell-level failure from a normalizer. Normalizers are pure
/// value-to-value functions with no idea where in the set they run; the
/// record store attaches column/row context when it surfaces one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    /// A name field held a zero-length value.
    EmptyName,
    /// No date-parse heuristic matched the value.
    UnparseableDate(String),
}

impl CellError {
    pub fn into_scrub(self, column: &str, row: usize) -> ScrubError {
        match self {
            CellError::EmptyName => ScrubError::EmptyName {
                column: column.to_string(),
                row,
            },
            CellError::UnparseableDate(value) => ScrubError::UnparseableDate {
                value,
                column: column.to_string(),
                row,
            },
        }
    }
}

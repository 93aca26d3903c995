//! Column name constants for the fixed contact schema.
//! Pipeline stages look columns up by these names; sources must provide them.

// Raw (pre-namespace) column names expected in the source data
pub const FIRST_NAME: &str = "First Name";
pub const MIDDLE_NAME: &str = "Middle Name";
pub const LAST_NAME: &str = "Last Name";
pub const DATE_OF_BIRTH: &str = "Date of Birth";
pub const ASSIGNED: &str = "Assigned";

// Derived column added by the pipeline, never expected in the source
pub const ID: &str = "ID";

/// Columns that must be present in the source data. Pass-through columns
/// beyond these are carried along untouched.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    FIRST_NAME,
    MIDDLE_NAME,
    LAST_NAME,
    DATE_OF_BIRTH,
    ASSIGNED,
];

/// The columns the title-case normalizer runs over.
pub const NAME_COLUMNS: [&str; 3] = [FIRST_NAME, MIDDLE_NAME, LAST_NAME];

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrubError {
    #[error("Failed to load input: {0}")]
    Load(String),

    #[error("Missing required column '{0}'")]
    SchemaMismatch(String),

    #[error("Column rename collision: more than one column maps to '{0}'")]
    RenameCollision(String),

    #[error("Empty name value in '{column}' (record {row})")]
    EmptyName { column: String, row: usize },

    #[error("Unparseable date '{value}' in '{column}' (record {row})")]
    UnparseableDate {
        value: String,
        column: String,
        row: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ScrubError>;

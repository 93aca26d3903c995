use crate::error::{Result, ScrubError};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Run configuration. Every field has a default reproducing the stock
/// migration behavior, so the tool works with no config file at all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScrubConfig {
    pub dedupe: DedupeConfig,
    pub fields: FieldsConfig,
    pub dates: DateConfig,
    pub assignment: AssignmentConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DedupeConfig {
    /// Columns to key deduplication on. Absent means every field is
    /// compared, which is the stock behavior.
    pub key_fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FieldsConfig {
    /// Prefix prepended to every column name, marking the entity type the
    /// rows belong to once merged into the target system.
    pub namespace_prefix: String,
}

impl FieldsConfig {
    /// The post-rename name of a raw column.
    pub fn prefixed(&self, column: &str) -> String {
        format!("{}{}", self.namespace_prefix, column)
    }
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            namespace_prefix: "Contact: ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DateConfig {
    /// chrono format string for canonical date output.
    pub output_format: String,
    /// Resolve ambiguous all-numeric dates day-first instead of the
    /// month-first default.
    pub day_first: bool,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            output_format: "%m/%d/%Y".to_string(),
            day_first: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssignmentConfig {
    /// Display name used for any code not present in the table.
    pub default: String,
    /// Known assignment code -> display name. Case-sensitive exact match.
    pub codes: HashMap<String, String>,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        let codes = HashMap::from([
            ("AA".to_string(), "Aaron Artsen".to_string()),
            ("BL".to_string(), "Bond Liver".to_string()),
            ("IC".to_string(), "Individual Contributor".to_string()),
            ("TM".to_string(), "Tim Mint".to_string()),
        ]);
        Self {
            default: "Gabe Michel".to_string(),
            codes,
        }
    }
}

impl ScrubConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ScrubError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: ScrubConfig = toml::from_str(&raw)?;
        Ok(config)
    }
}

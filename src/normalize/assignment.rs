use crate::config::AssignmentConfig;
use crate::record::Value;
use std::collections::HashMap;

/// Expands the "Assigned" shorthand codes the legacy system used into the
/// owner names the new CRM expects. Lookups are exact and case-sensitive;
/// anything the table does not know collapses to the configured default
/// owner, so this stage can never fail a run.
#[derive(Debug, Clone)]
pub struct AssignmentMap {
    codes: HashMap<String, String>,
    default: String,
}

impl AssignmentMap {
    pub fn from_config(config: &AssignmentConfig) -> Self {
        Self {
            codes: config.codes.clone(),
            default: config.default.clone(),
        }
    }

    /// Maps a single code to its owner name.
    pub fn resolve(&self, code: &str) -> &str {
        self.codes.get(code).map(String::as_str).unwrap_or(&self.default)
    }

    /// Rewrites one assignment cell. Empty cells get the default owner,
    /// the same as an unknown code.
    pub fn normalize(&self, value: &Value) -> Value {
        let owner = match value {
            Value::Text(code) => self.resolve(code),
            Value::Empty => self.default.as_str(),
            other => self.resolve(&other.to_string()),
        };
        Value::Text(owner.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> AssignmentMap {
        AssignmentMap::from_config(&AssignmentConfig::default())
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_known_codes_expand() {
        let map = map();
        assert_eq!(map.normalize(&text("AA")), text("Aaron Artsen"));
        assert_eq!(map.normalize(&text("BL")), text("Bond Liver"));
        assert_eq!(map.normalize(&text("IC")), text("Individual Contributor"));
        assert_eq!(map.normalize(&text("TM")), text("Tim Mint"));
    }

    #[test]
    fn test_unknown_code_falls_to_default() {
        assert_eq!(map().normalize(&text("ZZ")), text("Gabe Michel"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(map().normalize(&text("aa")), text("Gabe Michel"));
    }

    #[test]
    fn test_empty_cell_gets_default_owner() {
        assert_eq!(map().normalize(&Value::Empty), text("Gabe Michel"));
        assert_eq!(map().normalize(&text("")), text("Gabe Michel"));
    }

    #[test]
    fn test_already_expanded_name_is_not_preserved() {
        // A full name is just an unknown code to the table
        assert_eq!(map().normalize(&text("Tim Mint")), text("Gabe Michel"));
    }

    #[test]
    fn test_custom_table() {
        let config = AssignmentConfig {
            default: "Unassigned".to_string(),
            codes: HashMap::from([("XY".to_string(), "Xavier Young".to_string())]),
        };
        let map = AssignmentMap::from_config(&config);
        assert_eq!(map.normalize(&text("XY")), text("Xavier Young"));
        assert_eq!(map.normalize(&text("AA")), text("Unassigned"));
    }
}

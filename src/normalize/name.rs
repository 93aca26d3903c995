use super::CellError;
use crate::record::Value;

/// Title-cases one name: first character uppercased, everything after it
/// lowercased, regardless of original casing or embedded separators. So
/// `"mcdonald"` becomes `"Mcdonald"` and `"VAN DER BERG"` becomes
/// `"Van der berg"` — a documented simplification, not locale-aware
/// casing. A zero-length input has no character to uppercase and fails.
pub fn title_case(raw: &str) -> Result<String, CellError> {
    let mut chars = raw.chars();
    let first = chars.next().ok_or(CellError::EmptyName)?;
    let mut out: String = first.to_uppercase().collect();
    out.push_str(&chars.as_str().to_lowercase());
    Ok(out)
}

/// Cell-level wrapper applied to the name columns. Non-text cells are
/// coerced through their display form first; only a truly empty cell
/// fails.
pub fn normalize_name(value: &Value) -> Result<Value, CellError> {
    match value {
        Value::Text(s) => title_case(s).map(Value::Text),
        Value::Empty => Err(CellError::EmptyName),
        other => title_case(&other.to_string()).map(Value::Text),
    }
}

use super::CellError;
use crate::config::DateConfig;
use crate::error::{Result, ScrubError};
use crate::record::Value;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;

/// Canonicalizes the date-of-birth column. Structured `Date` cells are
/// formatted directly; free-form text goes through a fixed table of chrono
/// formats and then a token-based fallback modeled on the usual "fuzzy"
/// date parsers. Nothing is ever guessed silently: a value no heuristic
/// matches is an error, and time-of-day components are discarded.
#[derive(Debug)]
pub struct DateNormalizer {
    output_format: String,
    day_first: bool,
}

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s,./\-]+").unwrap());

static MONTHS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("january", 1),
        ("jan", 1),
        ("february", 2),
        ("feb", 2),
        ("march", 3),
        ("mar", 3),
        ("april", 4),
        ("apr", 4),
        ("may", 5),
        ("june", 6),
        ("jun", 6),
        ("july", 7),
        ("jul", 7),
        ("august", 8),
        ("aug", 8),
        ("september", 9),
        ("sept", 9),
        ("sep", 9),
        ("october", 10),
        ("oct", 10),
        ("november", 11),
        ("nov", 11),
        ("december", 12),
        ("dec", 12),
    ])
});

static WEEKDAYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "monday", "mon", "tuesday", "tue", "tues", "wednesday", "wed", "thursday", "thu",
        "thurs", "friday", "fri", "saturday", "sat", "sunday", "sun",
    ])
});

// Unambiguous datetime forms tried first so a trailing time component is
// consumed rather than rejected. Slash-separated datetimes go through the
// token fallback, which drops time tokens and honors the day/month policy.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

// `%y` entries sit before their `%Y` twins: `%y` consumes exactly two
// digits and fails on four, while `%Y` would happily read "24" as the
// year 24 AD.
const DATE_FORMATS_MONTH_FIRST: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%y",
    "%m-%d-%Y",
    "%m.%d.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATE_FORMATS_DAY_FIRST: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%y",
    "%d/%m/%Y",
    "%d-%m-%y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

impl DateNormalizer {
    /// Fails when the configured output format is not a valid chrono
    /// format string, so a bad config surfaces before any record does.
    pub fn new(config: &DateConfig) -> Result<Self> {
        let mut probe = String::new();
        if write!(probe, "{}", NaiveDate::default().format(&config.output_format)).is_err() {
            return Err(ScrubError::Config(format!(
                "invalid date output format '{}'",
                config.output_format
            )));
        }
        Ok(Self {
            output_format: config.output_format.clone(),
            day_first: config.day_first,
        })
    }

    /// Normalizes one date cell to canonical text.
    pub fn normalize(&self, value: &Value) -> std::result::Result<Value, CellError> {
        let date = match value {
            Value::Date(d) => *d,
            Value::Text(s) => self
                .parse_free_form(s)
                .ok_or_else(|| CellError::UnparseableDate(s.clone()))?,
            other => return Err(CellError::UnparseableDate(other.to_string())),
        };
        Ok(Value::Text(date.format(&self.output_format).to_string()))
    }

    /// Best-effort parse of a free-form date string.
    fn parse_free_form(&self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(dt.date());
            }
        }

        let formats = if self.day_first {
            DATE_FORMATS_DAY_FIRST
        } else {
            DATE_FORMATS_MONTH_FIRST
        };
        for format in formats {
            if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
                // A sub-1000 year means a two-digit input leaked into a %Y
                // slot; let the token fallback window it instead.
                if date.year() >= 1000 {
                    return Some(date);
                }
            }
        }

        self.parse_tokens(raw)
    }

    /// Fallback for inputs the format table misses: split on common
    /// separators, recognize month names and ordinal day suffixes, take a
    /// 4-digit token as the year, window 2-digit years, and resolve
    /// day/month order by policy.
    fn parse_tokens(&self, raw: &str) -> Option<NaiveDate> {
        let lowered = raw.to_lowercase();
        let mut named_month: Option<u32> = None;
        let mut year: Option<i32> = None;
        let mut numbers: Vec<u32> = Vec::new();

        for token in SEPARATORS.split(&lowered) {
            if token.is_empty() {
                continue;
            }
            // Time-of-day and weekday tokens carry no date information
            if token.contains(':') || token == "am" || token == "pm" {
                continue;
            }
            if WEEKDAYS.contains(token) {
                continue;
            }
            if let Some(&month) = MONTHS.get(token) {
                if named_month.replace(month).is_some() {
                    return None;
                }
                continue;
            }
            let digits = token
                .strip_suffix("st")
                .or_else(|| token.strip_suffix("nd"))
                .or_else(|| token.strip_suffix("rd"))
                .or_else(|| token.strip_suffix("th"))
                .unwrap_or(token);
            let n: u32 = digits.parse().ok()?;
            if digits.len() == 4 {
                if year.replace(n as i32).is_some() {
                    return None;
                }
            } else {
                numbers.push(n);
            }
        }

        let (year, month, day) = match (named_month, year) {
            // "March 5, 2024" — the one leftover number is the day
            (Some(month), Some(year)) => match numbers.as_slice() {
                [day] => (year, month, *day),
                _ => return None,
            },
            // "March 5, 24" — day plus a windowed two-digit year; a bare
            // "March 5" has no year and is rejected for determinism
            (Some(month), None) => match numbers.as_slice() {
                [day, y2] if *y2 < 100 => (window_year(*y2), month, *day),
                _ => return None,
            },
            // "2024 3 5" — year known, order policy settles the rest
            (None, Some(year)) => match numbers.as_slice() {
                [a, b] => {
                    let (month, day) = self.resolve_month_day(*a, *b)?;
                    (year, month, day)
                }
                _ => return None,
            },
            // "3/5/24" — all numeric, trailing two-digit year
            (None, None) => match numbers.as_slice() {
                [a, b, y2] if *y2 < 100 => {
                    let (month, day) = self.resolve_month_day(*a, *b)?;
                    (window_year(*y2), month, day)
                }
                _ => return None,
            },
        };

        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// Ambiguous numeric pair: the preferred slot order is month-first
    /// unless configured day-first. When the preferred month slot cannot
    /// hold a month and the other token can, the two are swapped rather
    /// than failing.
    fn resolve_month_day(&self, a: u32, b: u32) -> Option<(u32, u32)> {
        let (month, day) = if self.day_first { (b, a) } else { (a, b) };
        if (1..=12).contains(&month) {
            Some((month, day))
        } else if (1..=12).contains(&day) {
            Some((day, month))
        } else {
            None
        }
    }
}

/// chrono's `%y` window: 69–99 land in the 1900s, 00–68 in the 2000s.
fn window_year(two_digit: u32) -> i32 {
    if two_digit >= 69 {
        1900 + two_digit as i32
    } else {
        2000 + two_digit as i32
    }
}

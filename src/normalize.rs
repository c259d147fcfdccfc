//! Value-type detection and normalization.
//!
//! Each detector answers "is this value of kind X?" and, if so, returns
//! the canonical form. Detectors never panic and never error: a value
//! that cannot be normalized simply yields `None`, which lets validators
//! layer fallbacks (try date, then number, then boolean) without
//! exception-style control flow. Malformed input becomes `CORRUPTED` at
//! the validator level, never here.
//!
//! The float detector applies a locale pass for decimal-comma notation:
//! when a currency marker ("€", the word "euro") or a comma is present,
//! "." is treated as a thousands separator and "," as the decimal
//! separator, so `"1.234,56"` normalizes to `1234.56`. Without such a
//! marker the string is parsed as a plain dot-decimal number, which means
//! `"1.234"` stays the fraction `1.234`. That ambiguity is intentional
//! and pinned by tests.

use crate::value::CellValue;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

static INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+$").expect("valid integer regex"));

static FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.\d*|\.\d+|\d+)(?:[eE][+-]?\d+)?$").expect("valid float regex")
});

/// True/false spellings recognized by the boolean detector, covering
/// English and German plus the spreadsheet formula forms.
const TRUE_WORDS: [&str; 6] = ["true", "=true()", "wahr", "1", "yes", "ja"];
const FALSE_WORDS: [&str; 6] = ["false", "=false()", "falsch", "0", "no", "nein"];

/// Whether the value can be read as a boolean without normalizing it.
///
/// Narrower than [`as_bool`] for numbers: only 0 and 1 count as
/// boolean-like, while `as_bool` maps any number to its truthiness.
pub fn is_bool_like(value: &CellValue) -> bool {
    match value {
        CellValue::Bool(_) => true,
        CellValue::Int(n) => *n == 0 || *n == 1,
        CellValue::Float(f) => *f == 0.0 || *f == 1.0,
        CellValue::Text(s) => {
            let s = s.trim().to_lowercase();
            TRUE_WORDS.contains(&s.as_str()) || FALSE_WORDS.contains(&s.as_str())
        }
        _ => false,
    }
}

/// Normalize to a boolean. Numbers map to their truthiness, strings must
/// match one of the recognized spellings.
pub fn as_bool(value: &CellValue) -> Option<bool> {
    match value {
        CellValue::Bool(b) => Some(*b),
        CellValue::Int(n) => Some(*n != 0),
        CellValue::Float(f) => Some(*f != 0.0),
        CellValue::Text(s) => {
            let s = s.trim().to_lowercase();
            if TRUE_WORDS.contains(&s.as_str()) {
                Some(true)
            } else if FALSE_WORDS.contains(&s.as_str()) {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Normalize to a date-time. Strings must be ISO-8601; a bare date parses
/// to midnight.
pub fn as_datetime(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::DateTime(dt) => Some(*dt),
        CellValue::Text(s) => parse_iso_datetime(s.trim()),
        _ => None,
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = s.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    // ISO-8601 also allows a space between date and time.
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Some(dt);
    }
    if let Ok(d) = s.parse::<NaiveDate>() {
        return Some(d.and_time(NaiveTime::MIN));
    }
    None
}

/// Normalize to an integer. Floats qualify only with a zero fractional
/// part; strings must match an integer-only pattern after trimming.
pub fn as_int(value: &CellValue) -> Option<i64> {
    match value {
        CellValue::Int(n) => Some(*n),
        CellValue::Float(f) => {
            if f.is_finite() && f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                Some(*f as i64)
            } else {
                None
            }
        }
        CellValue::Text(s) => {
            let s = s.trim();
            if INT_RE.is_match(s) {
                s.parse::<i64>().ok()
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Normalize to a float, applying the locale-decimal pass to strings.
pub fn as_float(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Float(f) => Some(*f),
        CellValue::Int(n) => Some(*n as f64),
        CellValue::Text(s) => {
            let s = s.trim().to_lowercase();
            let locale_decimal = s.contains('€') || s.contains("euro") || s.contains(',');

            let mut cleaned = s.replace('€', "").replace("euro", "").replace(' ', "");
            if locale_decimal {
                cleaned = cleaned.replace('.', "").replace(',', ".");
            }

            if FLOAT_RE.is_match(&cleaned) {
                cleaned.parse::<f64>().ok()
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Normalize to a canonical numeric [`CellValue`], trying integer first.
///
/// The ordering matters: an integer-valued float normalizes to `Int`, not
/// `Float`, so later same-kind checks stay type-sensitive.
pub fn as_number(value: &CellValue) -> Option<CellValue> {
    if let Some(n) = as_int(value) {
        return Some(CellValue::Int(n));
    }
    as_float(value).map(CellValue::Float)
}

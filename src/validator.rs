//! The validator strategy set.
//!
//! A [`Validator`] classifies a pair of raw cell values into an
//! [`Outcome`]. The set is a closed enum rather than an open trait
//! hierarchy: dispatch stays exhaustive, and the composite
//! [`Validator::Auto`] variant delegates to the other variants
//! internally. Every `compare` is total — malformed or incomparable
//! input resolves to `Corrupted`, never to a panic or an error.

use crate::normalize;
use crate::outcome::Outcome;
use crate::value::CellValue;
use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Precision for date comparison. Coarser precisions truncate sub-unit
/// fields before equality comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePrecision {
    Day,
    Hour,
    Minute,
    Second,
}

/// A cell comparison strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Validator {
    /// Plain equality: `EQUALS` or `DIFFERENT`.
    Equal,
    /// Boolean-aware comparison across locale spellings and 0/1.
    Bool,
    /// Date-aware comparison at a configurable precision.
    Date { precision: DatePrecision },
    /// Integer-aware comparison; non-integers are `CORRUPTED`.
    Int,
    /// Numeric comparison: integers first, then floats rounded to
    /// `float_precision` decimal digits.
    Number { float_precision: i32 },
    /// Float comparison accepting deviations within
    /// `[reference - delta_down, reference + delta_up]`.
    TolerantFloat {
        delta_up: f64,
        delta_down: f64,
        float_precision: i32,
    },
    /// Always `OMITTED`: the column is excluded from judgment.
    Omit,
    /// Always `MATCHING`: the column is accepted without judgment.
    Ignore,
    /// Composite validator dispatching by detected value type.
    Auto,
}

impl Validator {
    /// A date validator at the given precision.
    pub fn date(precision: DatePrecision) -> Validator {
        Validator::Date { precision }
    }

    /// A numeric validator rounding floats to `float_precision` digits.
    pub fn number(float_precision: i32) -> Validator {
        Validator::Number { float_precision }
    }

    /// A tolerance-banded float validator.
    pub fn tolerant_float(delta_up: f64, delta_down: f64, float_precision: i32) -> Validator {
        Validator::TolerantFloat {
            delta_up,
            delta_down,
            float_precision,
        }
    }

    /// Compare two cell values. Total: every input pair yields an outcome.
    pub fn compare(&self, val1: &CellValue, val2: &CellValue) -> Outcome {
        match self {
            Validator::Equal => {
                if val1.loose_eq(val2) {
                    Outcome::Equals
                } else {
                    Outcome::Different
                }
            }
            Validator::Bool => compare_bool(val1, val2),
            Validator::Date { precision } => compare_date(val1, val2, *precision),
            Validator::Int => compare_int(val1, val2),
            Validator::Number { float_precision } => compare_number(val1, val2, *float_precision),
            Validator::TolerantFloat {
                delta_up,
                delta_down,
                float_precision,
            } => compare_tolerant_float(val1, val2, *delta_up, *delta_down, *float_precision),
            Validator::Omit => Outcome::Omitted,
            Validator::Ignore => Outcome::Matching,
            Validator::Auto => compare_auto(val1, val2),
        }
    }
}

fn compare_bool(val1: &CellValue, val2: &CellValue) -> Outcome {
    let (b1, b2) = match (normalize::as_bool(val1), normalize::as_bool(val2)) {
        (Some(b1), Some(b2)) => (b1, b2),
        _ => return Outcome::Corrupted,
    };
    if val1.loose_eq(val2) {
        Outcome::Equals
    } else if b1 == b2 {
        Outcome::Matching
    } else {
        Outcome::Different
    }
}

fn truncate(dt: NaiveDateTime, precision: DatePrecision) -> NaiveDateTime {
    let time = match precision {
        DatePrecision::Day => NaiveTime::MIN,
        DatePrecision::Hour => {
            NaiveTime::from_hms_opt(dt.hour(), 0, 0).unwrap_or(NaiveTime::MIN)
        }
        DatePrecision::Minute => {
            NaiveTime::from_hms_opt(dt.hour(), dt.minute(), 0).unwrap_or(NaiveTime::MIN)
        }
        DatePrecision::Second => {
            NaiveTime::from_hms_opt(dt.hour(), dt.minute(), dt.second()).unwrap_or(NaiveTime::MIN)
        }
    };
    dt.date().and_time(time)
}

fn compare_date(val1: &CellValue, val2: &CellValue, precision: DatePrecision) -> Outcome {
    let (d1, d2) = match (normalize::as_datetime(val1), normalize::as_datetime(val2)) {
        (Some(d1), Some(d2)) => (d1, d2),
        _ => return Outcome::Corrupted,
    };
    if d1 == d2 {
        return if val1.loose_eq(val2) {
            Outcome::Equals
        } else {
            Outcome::Matching
        };
    }
    if truncate(d1, precision) == truncate(d2, precision) {
        Outcome::Almost
    } else {
        Outcome::Different
    }
}

fn compare_int(val1: &CellValue, val2: &CellValue) -> Outcome {
    if val1.strict_eq(val2) {
        return Outcome::Equals;
    }
    match (normalize::as_int(val1), normalize::as_int(val2)) {
        (Some(n1), Some(n2)) => {
            if n1 == n2 {
                Outcome::Matching
            } else {
                Outcome::Different
            }
        }
        _ => Outcome::Corrupted,
    }
}

fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

fn compare_number(val1: &CellValue, val2: &CellValue, float_precision: i32) -> Outcome {
    if val1.strict_eq(val2) {
        return Outcome::Equals;
    }

    if let (Some(n1), Some(n2)) = (normalize::as_int(val1), normalize::as_int(val2)) {
        return if n1 == n2 {
            Outcome::Matching
        } else {
            Outcome::Different
        };
    }

    match (normalize::as_float(val1), normalize::as_float(val2)) {
        (Some(f1), Some(f2)) => {
            if f1 == f2 {
                Outcome::Matching
            } else if round_to(f1, float_precision) == round_to(f2, float_precision) {
                Outcome::Almost
            } else {
                Outcome::Different
            }
        }
        _ => Outcome::Corrupted,
    }
}

fn compare_tolerant_float(
    val1: &CellValue,
    val2: &CellValue,
    delta_up: f64,
    delta_down: f64,
    float_precision: i32,
) -> Outcome {
    if val1.loose_eq(val2) {
        return Outcome::Equals;
    }
    match (normalize::as_float(val1), normalize::as_float(val2)) {
        (Some(f1), Some(f2)) => {
            if f1 == f2 {
                return Outcome::Matching;
            }
            if round_to(f1, float_precision) == round_to(f2, float_precision) {
                return Outcome::Almost;
            }
            let lower = f2 - delta_down;
            let upper = f2 + delta_up;
            if lower <= f1 && f1 <= upper {
                Outcome::Accepted
            } else {
                Outcome::Different
            }
        }
        _ => Outcome::Corrupted,
    }
}

fn compare_auto(val1: &CellValue, val2: &CellValue) -> Outcome {
    if val1.loose_eq(val2) {
        return Outcome::Equals;
    }
    if val1.is_empty() || val2.is_empty() {
        return Outcome::Different;
    }

    if let (Some(d1), Some(d2)) = (normalize::as_datetime(val1), normalize::as_datetime(val2)) {
        return compare_date(
            &CellValue::DateTime(d1),
            &CellValue::DateTime(d2),
            DatePrecision::Day,
        );
    }

    if let (Some(n1), Some(n2)) = (normalize::as_number(val1), normalize::as_number(val2)) {
        return compare_number(&n1, &n2, 10);
    }

    if normalize::is_bool_like(val1) && normalize::is_bool_like(val2) {
        return compare_bool(val1, val2);
    }

    Outcome::Different
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn equal_validator_is_reflexive() {
        let values = [
            CellValue::Empty,
            CellValue::Bool(true),
            CellValue::Int(-3),
            CellValue::Float(2.5),
            text("abc"),
        ];
        for v in values {
            assert_eq!(Validator::Equal.compare(&v, &v), Outcome::Equals);
        }
    }

    #[test]
    fn auto_treats_empty_sides_as_different() {
        let auto = Validator::Auto;
        assert_eq!(
            auto.compare(&CellValue::Empty, &CellValue::Empty),
            Outcome::Equals
        );
        assert_eq!(
            auto.compare(&CellValue::Empty, &CellValue::Int(1)),
            Outcome::Different
        );
        assert_eq!(
            auto.compare(&text("x"), &CellValue::Empty),
            Outcome::Different
        );
    }

    #[test]
    fn auto_dispatches_dates_before_numbers() {
        let auto = Validator::Auto;
        assert_eq!(
            auto.compare(&text("2024-03-15"), &text("2024-03-15T08:00:00")),
            Outcome::Almost
        );
        assert_eq!(
            auto.compare(&text("2024-03-15"), &text("2024-03-16")),
            Outcome::Different
        );
    }

    #[test]
    fn auto_matches_numbers_across_forms() {
        let auto = Validator::Auto;
        // Auto normalizes before delegating, so equal magnitudes in
        // different literal forms land on the normalized-equal path.
        assert_eq!(auto.compare(&text("5"), &CellValue::Int(5)), Outcome::Equals);
        assert_eq!(
            auto.compare(&CellValue::Float(5.5), &text("5,5")),
            Outcome::Equals
        );
        assert_eq!(
            auto.compare(&text("5.1"), &CellValue::Float(5.2)),
            Outcome::Different
        );
        assert_eq!(auto.compare(&text("ja"), &text("yes")), Outcome::Matching);
        assert_eq!(auto.compare(&text("abc"), &text("def")), Outcome::Different);
    }

    #[test]
    fn date_precision_truncates() {
        let a = text("2024-03-15T10:30:45");
        let b = text("2024-03-15T10:30:50");
        assert_eq!(
            Validator::date(DatePrecision::Minute).compare(&a, &b),
            Outcome::Almost
        );
        assert_eq!(
            Validator::date(DatePrecision::Second).compare(&a, &b),
            Outcome::Different
        );
    }
}

//! Cell values and formats.
//!
//! This module defines the value model shared by the whole crate:
//! - [`CellValue`]: the typed content of a single cell
//! - [`CellFormat`]: the subset of cell styling the diff consumer touches
//!
//! Two equality notions exist side by side. *Loose* equality compares
//! integers and floats numerically across kinds (`Int(5)` equals
//! `Float(5.0)`), matching how dynamically typed table sources compare
//! values. *Strict* equality additionally requires the same kind, which is
//! what the numeric validators use to decide between `EQUALS` and
//! `MATCHING`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The typed content of a single table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellValue {
    /// An empty or missing cell.
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Loose equality: integers and floats compare numerically across
    /// kinds, everything else compares within its own kind.
    pub fn loose_eq(&self, other: &CellValue) -> bool {
        match (self, other) {
            (CellValue::Int(a), CellValue::Float(b)) => *a as f64 == *b,
            (CellValue::Float(a), CellValue::Int(b)) => *a == *b as f64,
            _ => self == other,
        }
    }

    /// Whether both values are the same variant of [`CellValue`].
    pub fn same_kind(&self, other: &CellValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Loose equality plus same kind. `Int(5)` and `Float(5.0)` are
    /// loose-equal but not strict-equal.
    pub fn strict_eq(&self, other: &CellValue) -> bool {
        self.same_kind(other) && self.loose_eq(other)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// The text content, if this is a `Text` cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> CellValue {
        CellValue::Bool(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> CellValue {
        CellValue::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> CellValue {
        CellValue::Float(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> CellValue {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> CellValue {
        CellValue::Text(v)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(v: NaiveDateTime) -> CellValue {
        CellValue::DateTime(v)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Int(n) => write!(f, "{}", n),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::DateTime(dt) => write!(f, "{}", dt),
        }
    }
}

/// The styling attributes a table adapter can report and apply.
///
/// All fields are optional; applying a format only touches the fields that
/// are set. The diff consumer carries base formats over from the source
/// row and then overlays `fill_color`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellFormat {
    pub font_name: Option<String>,
    pub font_size: Option<f32>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    /// RGB string, e.g. "FF0000".
    pub font_color: Option<String>,
    /// RGB string, e.g. "CCFFCC".
    pub fill_color: Option<String>,
}

impl CellFormat {
    /// A format carrying only a fill color.
    pub fn with_fill(color: &str) -> CellFormat {
        CellFormat {
            fill_color: Some(color.to_string()),
            ..CellFormat::default()
        }
    }

    /// Overlay a fill color, keeping all other fields.
    pub fn apply_fill(&mut self, color: &str) {
        self.fill_color = Some(color.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_and_float_are_loose_equal_but_not_strict_equal() {
        let a = CellValue::Int(5);
        let b = CellValue::Float(5.0);
        assert!(a.loose_eq(&b));
        assert!(b.loose_eq(&a));
        assert!(!a.strict_eq(&b));
        assert!(a.strict_eq(&CellValue::Int(5)));
    }

    #[test]
    fn bool_does_not_loose_equal_numbers() {
        assert!(!CellValue::Bool(true).loose_eq(&CellValue::Int(1)));
        assert!(!CellValue::Bool(false).loose_eq(&CellValue::Float(0.0)));
    }

    #[test]
    fn text_equality_is_exact() {
        assert!(CellValue::from("5").loose_eq(&CellValue::from("5")));
        assert!(!CellValue::from("5").loose_eq(&CellValue::Int(5)));
    }

    #[test]
    fn apply_fill_preserves_other_fields() {
        let mut fmt = CellFormat {
            bold: Some(true),
            font_name: Some("Calibri".to_string()),
            ..CellFormat::default()
        };
        fmt.apply_fill("FF9999");
        assert_eq!(fmt.fill_color.as_deref(), Some("FF9999"));
        assert_eq!(fmt.bold, Some(true));
        assert_eq!(fmt.font_name.as_deref(), Some("Calibri"));
    }
}

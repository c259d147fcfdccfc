//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use table_validate::{CellValue, MemoryTable};

pub fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

pub fn int(n: i64) -> CellValue {
    CellValue::Int(n)
}

pub fn float(f: f64) -> CellValue {
    CellValue::Float(f)
}

/// Build a table from rows of text cells; the first row doubles as the
/// header in most tests.
pub fn table_from_text(rows: &[&[&str]]) -> MemoryTable {
    MemoryTable::from_rows(
        rows.iter()
            .map(|row| row.iter().map(|s| text(s)).collect())
            .collect(),
    )
}

pub fn table_from_rows(rows: Vec<Vec<CellValue>>) -> MemoryTable {
    MemoryTable::from_rows(rows)
}

//! The table-access capability and row iteration.
//!
//! Storage adapters implement [`TableEngine`]; the comparison core only
//! ever talks to tables through this trait. Rows and columns are
//! 1-based. Write methods are fallible: adapters for read-only storage
//! return [`EngineError`] instead of mutating, and the comparison run
//! aborts on the first such violation.
//!
//! [`RowCursor`] provides finite, forward-only row iteration with a
//! cached known length; inserting through the cursor bumps position and
//! length together so the two can never desynchronize.

use crate::error_codes;
use crate::value::{CellFormat, CellValue};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors raised by table-access adapters on capability violations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error(
        "[TVAL_ENGINE_001] table is read-only, {operation} rejected. Suggestion: open the reference table writable or compare in bulk mode."
    )]
    ReadOnly { operation: &'static str },

    #[error(
        "[TVAL_ENGINE_002] adapter '{engine}' supports no writes ({operation}). Suggestion: copy the data into a writable adapter first."
    )]
    WriteUnsupported {
        engine: &'static str,
        operation: &'static str,
    },

    #[error(
        "[TVAL_ENGINE_003] unsupported table format '{extension}'. Suggestion: check the file extension against the registered adapters."
    )]
    UnsupportedFormat { extension: String },
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ReadOnly { .. } => error_codes::ENGINE_READ_ONLY,
            EngineError::WriteUnsupported { .. } => error_codes::ENGINE_WRITE_UNSUPPORTED,
            EngineError::UnsupportedFormat { .. } => error_codes::ENGINE_UNSUPPORTED_FORMAT,
        }
    }
}

/// Minimal table-access capability implemented by storage adapters.
///
/// Getters never fail: out-of-range reads yield [`CellValue::Empty`] or
/// empty rows. Setters must return an [`EngineError`] when the adapter or
/// the underlying storage is read-only.
pub trait TableEngine {
    fn max_row(&self) -> u32;
    fn max_col(&self) -> u32;
    fn cell_value(&self, row: u32, col: u32) -> CellValue;
    fn row_values(&self, row: u32) -> Vec<CellValue>;
    fn cell_format(&self, row: u32, col: u32) -> CellFormat;
    fn row_formats(&self, row: u32) -> Vec<CellFormat>;

    /// Whether the underlying storage is read-only.
    fn is_readonly(&self) -> bool;
    /// Whether this adapter implementation supports no writes at all,
    /// independent of the specific table's own read-only flag.
    fn is_engine_readonly(&self) -> bool;

    fn set_cell_value(&mut self, row: u32, col: u32, value: CellValue) -> Result<(), EngineError>;
    /// Insert an empty row at the given position, shifting later rows
    /// down.
    fn add_row(&mut self, row: u32) -> Result<(), EngineError>;
    fn set_row_values(&mut self, row: u32, values: &[CellValue]) -> Result<(), EngineError>;
    fn set_cell_format(&mut self, row: u32, col: u32, fmt: CellFormat) -> Result<(), EngineError>;
    fn set_row_formats(&mut self, row: u32, formats: &[CellFormat]) -> Result<(), EngineError>;
}

/// Forward-only row cursor over a [`TableEngine`].
///
/// The cursor caches the known row count at construction. It is finite
/// and not restartable; a fresh cursor must be created for a second
/// pass. [`RowCursor::insert_row`] atomically advances the position and
/// grows the known length, so rows inserted mid-iteration are skipped
/// rather than revisited.
#[derive(Debug)]
pub struct RowCursor {
    current: u32,
    max_row: u32,
}

impl RowCursor {
    pub fn new(engine: &dyn TableEngine) -> RowCursor {
        RowCursor {
            current: 1,
            max_row: engine.max_row(),
        }
    }

    /// The current known row count, including rows inserted through this
    /// cursor.
    pub fn max_row(&self) -> u32 {
        self.max_row
    }

    /// Produce the next `(row_index, row_values)` pair, or `None` once
    /// exhausted.
    pub fn next_row(&mut self, engine: &dyn TableEngine) -> Option<(u32, Vec<CellValue>)> {
        if self.current > self.max_row {
            return None;
        }
        let row = self.current;
        self.current += 1;
        Some((row, engine.row_values(row)))
    }

    /// Insert a row at the current position and step past it. Returns
    /// the index of the inserted row.
    pub fn insert_row(
        &mut self,
        engine: &mut dyn TableEngine,
        values: &[CellValue],
    ) -> Result<u32, EngineError> {
        engine.add_row(self.current)?;
        engine.set_row_values(self.current, values)?;
        let inserted = self.current;
        self.current += 1;
        self.max_row += 1;
        Ok(inserted)
    }
}

/// Exclusive handle on the reference side of a streaming comparison.
///
/// Pairs the reference engine with the cursor iterating it, which is
/// what row insertion needs to keep position and length in step. Handed
/// to [`RowSink::accept`](crate::RowSink::accept) for each row.
pub struct ReferenceSide<'a> {
    engine: &'a mut dyn TableEngine,
    cursor: &'a mut RowCursor,
}

impl<'a> ReferenceSide<'a> {
    pub fn new(engine: &'a mut dyn TableEngine, cursor: &'a mut RowCursor) -> ReferenceSide<'a> {
        ReferenceSide { engine, cursor }
    }

    pub fn max_col(&self) -> u32 {
        self.engine.max_col()
    }

    pub fn row_formats(&self, row: u32) -> Vec<CellFormat> {
        self.engine.row_formats(row)
    }

    pub fn set_row_formats(&mut self, row: u32, formats: &[CellFormat]) -> Result<(), EngineError> {
        self.engine.set_row_formats(row, formats)
    }

    /// Insert the given values immediately after the row the cursor last
    /// produced. Returns the inserted row index.
    pub fn insert_row(&mut self, values: &[CellValue]) -> Result<u32, EngineError> {
        self.cursor.insert_row(self.engine, values)
    }
}

/// In-memory [`TableEngine`] used by tests and by callers that already
/// hold their data in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    nrows: u32,
    ncols: u32,
    cells: FxHashMap<(u32, u32), CellValue>,
    formats: FxHashMap<(u32, u32), CellFormat>,
    readonly: bool,
}

impl MemoryTable {
    pub fn new() -> MemoryTable {
        MemoryTable::default()
    }

    /// Build a table from dense rows. Row and column counts come from
    /// the longest row.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> MemoryTable {
        let nrows = rows.len() as u32;
        let ncols = rows.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut cells = FxHashMap::default();
        for (r, row) in rows.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                if !value.is_empty() {
                    cells.insert((r as u32 + 1, c as u32 + 1), value);
                }
            }
        }
        MemoryTable {
            nrows,
            ncols,
            cells,
            formats: FxHashMap::default(),
            readonly: false,
        }
    }

    /// Mark the table read-only; subsequent writes fail.
    pub fn read_only(mut self) -> MemoryTable {
        self.readonly = true;
        self
    }

    fn ensure_writable(&self, operation: &'static str) -> Result<(), EngineError> {
        if self.readonly {
            return Err(EngineError::ReadOnly { operation });
        }
        Ok(())
    }
}

impl TableEngine for MemoryTable {
    fn max_row(&self) -> u32 {
        self.nrows
    }

    fn max_col(&self) -> u32 {
        self.ncols
    }

    fn cell_value(&self, row: u32, col: u32) -> CellValue {
        self.cells
            .get(&(row, col))
            .cloned()
            .unwrap_or(CellValue::Empty)
    }

    fn row_values(&self, row: u32) -> Vec<CellValue> {
        if row == 0 || row > self.nrows {
            return Vec::new();
        }
        (1..=self.ncols).map(|c| self.cell_value(row, c)).collect()
    }

    fn cell_format(&self, row: u32, col: u32) -> CellFormat {
        self.formats.get(&(row, col)).cloned().unwrap_or_default()
    }

    fn row_formats(&self, row: u32) -> Vec<CellFormat> {
        (1..=self.ncols).map(|c| self.cell_format(row, c)).collect()
    }

    fn is_readonly(&self) -> bool {
        self.readonly
    }

    fn is_engine_readonly(&self) -> bool {
        false
    }

    fn set_cell_value(&mut self, row: u32, col: u32, value: CellValue) -> Result<(), EngineError> {
        self.ensure_writable("set_cell_value")?;
        self.nrows = self.nrows.max(row);
        self.ncols = self.ncols.max(col);
        if value.is_empty() {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
        Ok(())
    }

    fn add_row(&mut self, row: u32) -> Result<(), EngineError> {
        self.ensure_writable("add_row")?;
        let shift = |map_row: u32| if map_row >= row { map_row + 1 } else { map_row };
        self.cells = std::mem::take(&mut self.cells)
            .into_iter()
            .map(|((r, c), v)| ((shift(r), c), v))
            .collect();
        self.formats = std::mem::take(&mut self.formats)
            .into_iter()
            .map(|((r, c), f)| ((shift(r), c), f))
            .collect();
        self.nrows += 1;
        Ok(())
    }

    fn set_row_values(&mut self, row: u32, values: &[CellValue]) -> Result<(), EngineError> {
        self.ensure_writable("set_row_values")?;
        for (c, value) in values.iter().enumerate() {
            self.set_cell_value(row, c as u32 + 1, value.clone())?;
        }
        Ok(())
    }

    fn set_cell_format(&mut self, row: u32, col: u32, fmt: CellFormat) -> Result<(), EngineError> {
        self.ensure_writable("set_cell_format")?;
        self.formats.insert((row, col), fmt);
        Ok(())
    }

    fn set_row_formats(&mut self, row: u32, formats: &[CellFormat]) -> Result<(), EngineError> {
        self.ensure_writable("set_row_formats")?;
        for (c, fmt) in formats.iter().enumerate() {
            self.set_cell_format(row, c as u32 + 1, fmt.clone())?;
        }
        Ok(())
    }
}

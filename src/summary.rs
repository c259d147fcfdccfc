//! Result aggregation for a comparison run.
//!
//! [`ComparisonSummary`] buckets every recorded cell by its [`Outcome`]
//! and derives global and per-column counts. It is created once per run,
//! populated incrementally by the diff consumer, and read afterwards.

use crate::error_codes;
use crate::outcome::Outcome;
use crate::value::CellValue;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Usage errors raised by summary projections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SummaryError {
    #[error(
        "[TVAL_SUMMARY_001] header values must be set before a per-column summary. Suggestion: call set_header_values with the reference header row first."
    )]
    HeaderValuesNotSet,
}

impl SummaryError {
    pub fn code(&self) -> &'static str {
        match self {
            SummaryError::HeaderValuesNotSet => error_codes::SUMMARY_HEADERS_NOT_SET,
        }
    }
}

/// One recorded cell comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    /// Comparison row, 1-based.
    pub row: u32,
    /// Column, 1-based.
    pub col: u32,
    pub value1: CellValue,
    pub value2: CellValue,
}

/// Accumulates cell comparison results, bucketed by outcome.
///
/// Order within one outcome's bucket follows insertion order; order
/// across outcomes carries no meaning. Not shareable across concurrent
/// runs.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSummary {
    results: FxHashMap<Outcome, Vec<SummaryRecord>>,
    header_values: Vec<CellValue>,
}

impl ComparisonSummary {
    pub fn new() -> ComparisonSummary {
        ComparisonSummary::default()
    }

    /// Record one cell comparison. `row` and `col` are 1-based.
    pub fn add(&mut self, row: u32, col: u32, value1: CellValue, value2: CellValue, outcome: Outcome) {
        self.results.entry(outcome).or_default().push(SummaryRecord {
            row,
            col,
            value1,
            value2,
        });
    }

    /// Number of recorded cells with the given outcome.
    pub fn count(&self, outcome: Outcome) -> usize {
        self.results.get(&outcome).map_or(0, Vec::len)
    }

    /// Total number of recorded cells across all outcomes.
    pub fn total(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }

    /// All recorded cells with the given outcome, in insertion order.
    pub fn cells(&self, outcome: Outcome) -> &[SummaryRecord] {
        self.results.get(&outcome).map_or(&[], Vec::as_slice)
    }

    /// Global counts per outcome name, e.g. `{"DIFFERENT": 7, ...}`.
    /// Only outcomes with at least one record appear.
    pub fn summary(&self) -> BTreeMap<&'static str, usize> {
        self.results
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(outcome, records)| (outcome.name(), records.len()))
            .collect()
    }

    /// Set the header values used to project counts onto columns.
    pub fn set_header_values(&mut self, header_values: Vec<CellValue>) {
        self.header_values = header_values;
    }

    pub fn header_values(&self) -> &[CellValue] {
        &self.header_values
    }

    /// Per-column counts, one map per header column.
    ///
    /// Only records with a column inside `[1, len(headers)]` are counted.
    /// Calling this without header values set is a usage error.
    pub fn summary_by_header_array(
        &self,
    ) -> Result<Vec<BTreeMap<&'static str, usize>>, SummaryError> {
        if self.header_values.is_empty() {
            return Err(SummaryError::HeaderValuesNotSet);
        }

        let mut columns: Vec<BTreeMap<&'static str, usize>> =
            vec![BTreeMap::new(); self.header_values.len()];

        for (outcome, records) in &self.results {
            for record in records {
                let col = record.col as usize;
                if col >= 1 && col <= columns.len() {
                    *columns[col - 1].entry(outcome.name()).or_insert(0) += 1;
                }
            }
        }

        Ok(columns)
    }
}

impl std::fmt::Display for ComparisonSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Comparison Summary:")?;
        for outcome in Outcome::ALL {
            let count = self.count(outcome);
            if count > 0 {
                writeln!(f, "{}: {}", outcome.name(), count)?;
            }
        }
        Ok(())
    }
}

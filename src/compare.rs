//! The row-by-row diff orchestrator.
//!
//! Pairs rows from two tables by position and classifies every cell pair
//! through the per-column validator array:
//! - [`compare_row`]: one row pair, including row-length reconciliation
//! - [`compare_tables`]: bulk mode, collecting every [`RowDiff`]
//! - [`compare_tables_streaming`]: streaming mode, forwarding each row to
//!   a [`RowSink`](crate::RowSink) without retaining results
//!
//! Row 1 is special when [`CompareConfig::first_row_is_header`] is set:
//! it is compared with a strict-equality validator array regardless of
//! the validators assigned to data columns, enforcing literal header
//! agreement.

use crate::error_codes;
use crate::outcome::Outcome;
use crate::registry::ValidatorRegistry;
use crate::sink::RowSink;
use crate::table::{EngineError, ReferenceSide, RowCursor, TableEngine};
use crate::validator::Validator;
use crate::value::CellValue;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors produced by a comparison run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompareError {
    #[error("[TVAL_COMPARE_001] {0}")]
    Engine(#[from] EngineError),

    #[error("[TVAL_COMPARE_002] sink error: {message}. Suggestion: check the consumer's output destination and retry.")]
    Sink { message: String },
}

impl CompareError {
    pub fn code(&self) -> &'static str {
        match self {
            CompareError::Engine(_) => error_codes::COMPARE_ENGINE,
            CompareError::Sink { .. } => error_codes::COMPARE_SINK,
        }
    }
}

/// Behavioral knobs for a comparison run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// When set, row 1 is compared with strict equality per column,
    /// regardless of the validators assigned to data columns.
    pub first_row_is_header: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            first_row_is_header: true,
        }
    }
}

impl CompareConfig {
    pub fn builder() -> CompareConfigBuilder {
        CompareConfigBuilder {
            inner: CompareConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompareConfigBuilder {
    inner: CompareConfig,
}

impl CompareConfigBuilder {
    pub fn first_row_is_header(mut self, value: bool) -> Self {
        self.inner.first_row_is_header = value;
        self
    }

    pub fn build(self) -> CompareConfig {
        self.inner
    }
}

/// One aligned row pair with its per-column outcomes.
///
/// `index1` / `index2` are the 1-based source row indices, or -1 when the
/// source had no row at this position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowDiff {
    /// Logical comparison row, 1-based.
    pub row: u32,
    pub index1: i64,
    pub values1: Vec<CellValue>,
    pub index2: i64,
    pub values2: Vec<CellValue>,
    pub outcomes: Vec<Outcome>,
}

/// Per-column validator overrides applied on top of a base array, keyed
/// by zero-based index or by header name.
#[derive(Debug, Clone, Default)]
pub struct ValidatorOverrides {
    by_index: FxHashMap<usize, Validator>,
    by_name: FxHashMap<String, Validator>,
}

impl ValidatorOverrides {
    pub fn new() -> ValidatorOverrides {
        ValidatorOverrides::default()
    }

    pub fn by_index(mut self, index: usize, validator: Validator) -> Self {
        self.by_index.insert(index, validator);
        self
    }

    pub fn by_name(mut self, name: impl Into<String>, validator: Validator) -> Self {
        self.by_name.insert(name.into(), validator);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty() && self.by_name.is_empty()
    }
}

/// Build a dense validator array for the reference table's columns.
///
/// Starts from `base` (padded with `default` up to the reference column
/// count), then applies `overrides`. Index overrides beyond the column
/// count are ignored; name overrides that match no header cell are
/// silently dropped.
pub fn calculate_validator_array(
    reference: &dyn TableEngine,
    base: Option<Vec<Option<Validator>>>,
    overrides: Option<&ValidatorOverrides>,
    default: Option<Validator>,
) -> Vec<Option<Validator>> {
    let max_cols = reference.max_col() as usize;

    let mut validators = base.unwrap_or_default();
    while validators.len() < max_cols {
        validators.push(default.clone());
    }

    if let Some(overrides) = overrides {
        if !overrides.is_empty() {
            for (&index, validator) in &overrides.by_index {
                if index < max_cols {
                    validators[index] = Some(validator.clone());
                }
            }
            if !overrides.by_name.is_empty() {
                let header = reference.row_values(1);
                for (name, validator) in &overrides.by_name {
                    let position = header
                        .iter()
                        .position(|cell| cell.as_text() == Some(name.as_str()));
                    if let Some(index) = position {
                        if index < validators.len() {
                            validators[index] = Some(validator.clone());
                        }
                    }
                }
            }
        }
    }

    validators
}

/// Compare two rows cell by cell.
///
/// Columns without a validator are `OMITTED`. Columns beyond the shorter
/// row produce trailing `LONGER` (row 1 longer) or `SHORTER` (row 2
/// longer) outcomes, exactly one per surplus column.
pub fn compare_row(
    row1: &[CellValue],
    row2: &[CellValue],
    validators: &[Option<Validator>],
) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(row1.len().max(row2.len()));

    for (c, (val1, val2)) in row1.iter().zip(row2.iter()).enumerate() {
        let outcome = match validators.get(c).and_then(|v| v.as_ref()) {
            Some(validator) => validator.compare(val1, val2),
            None => Outcome::Omitted,
        };
        outcomes.push(outcome);
    }

    if row1.len() > row2.len() {
        outcomes.extend(std::iter::repeat(Outcome::Longer).take(row1.len() - row2.len()));
    } else if row2.len() > row1.len() {
        outcomes.extend(std::iter::repeat(Outcome::Shorter).take(row2.len() - row1.len()));
    }

    outcomes
}

fn next_or_absent(cursor: &mut RowCursor, engine: &dyn TableEngine) -> (i64, Vec<CellValue>) {
    match cursor.next_row(engine) {
        Some((index, values)) => (index as i64, values),
        None => (-1, Vec::new()),
    }
}

fn strict_header_array(reference: &dyn TableEngine) -> Vec<Option<Validator>> {
    calculate_validator_array(reference, None, None, Some(Validator::Equal))
}

fn row_validators<'a>(
    r: u32,
    config: &CompareConfig,
    header_array: &'a [Option<Validator>],
    validators: &'a [Option<Validator>],
) -> &'a [Option<Validator>] {
    if r == 1 && config.first_row_is_header {
        header_array
    } else {
        validators
    }
}

/// Bulk mode: compare every row pair and collect the results.
///
/// Produces outcome-for-outcome the same classification sequence as
/// [`compare_tables_streaming`] on the same inputs.
pub fn compare_tables(
    measured: &dyn TableEngine,
    reference: &dyn TableEngine,
    validators: &[Option<Validator>],
    config: &CompareConfig,
) -> Vec<RowDiff> {
    let mut cursor1 = RowCursor::new(measured);
    let mut cursor2 = RowCursor::new(reference);
    let max_rows = cursor1.max_row().max(cursor2.max_row());
    debug!(max_rows, "comparing tables in bulk mode");

    let header_array = strict_header_array(reference);
    let mut diffs = Vec::with_capacity(max_rows as usize);

    for r in 1..=max_rows {
        let (index1, values1) = next_or_absent(&mut cursor1, measured);
        let (index2, values2) = next_or_absent(&mut cursor2, reference);
        let outcomes = compare_row(
            &values1,
            &values2,
            row_validators(r, config, &header_array, validators),
        );
        diffs.push(RowDiff {
            row: r,
            index1,
            values1,
            index2,
            values2,
            outcomes,
        });
    }

    diffs
}

/// Streaming mode: forward each compared row to `sink` without retaining
/// results.
///
/// The loop bound is fixed to `max(rows1, rows2)` before iteration, so
/// rows the sink inserts into the reference table are skipped rather
/// than compared. The reference engine must be exclusively owned by this
/// run for its duration.
pub fn compare_tables_streaming<S: RowSink>(
    measured: &dyn TableEngine,
    reference: &mut dyn TableEngine,
    validators: &[Option<Validator>],
    config: &CompareConfig,
    sink: &mut S,
) -> Result<(), CompareError> {
    let mut cursor1 = RowCursor::new(measured);
    let mut cursor2 = RowCursor::new(&*reference);
    let max_rows = cursor1.max_row().max(cursor2.max_row());
    debug!(max_rows, "comparing tables in streaming mode");

    let header_array = strict_header_array(&*reference);

    sink.begin()?;
    for r in 1..=max_rows {
        let (index1, values1) = next_or_absent(&mut cursor1, measured);
        let (index2, values2) = next_or_absent(&mut cursor2, &*reference);
        let outcomes = compare_row(
            &values1,
            &values2,
            row_validators(r, config, &header_array, validators),
        );
        let diff = RowDiff {
            row: r,
            index1,
            values1,
            index2,
            values2,
            outcomes,
        };
        let mut side = ReferenceSide::new(&mut *reference, &mut cursor2);
        sink.accept(&diff, &mut side)?;
    }
    sink.finish()
}

/// Compare two tables using a registry to assign validators.
///
/// Resolves the validator array from the reference header row (falling
/// back to a registry whose default is [`Validator::Auto`] when none is
/// given) and runs bulk mode.
pub fn compare_tables_with_registry(
    measured: &dyn TableEngine,
    reference: &dyn TableEngine,
    registry: Option<&ValidatorRegistry>,
    config: &CompareConfig,
) -> Vec<RowDiff> {
    let auto = ValidatorRegistry::with_default(Validator::Auto);
    let registry = registry.unwrap_or(&auto);
    let header = reference.row_values(1);
    let validators = registry.resolve_validators(&header, reference.max_col() as usize);
    compare_tables(measured, reference, &validators, config)
}

//! The diff consumer: turns outcomes into visual and structural effects.
//!
//! [`DiffConsumer`] receives each compared row in streaming mode and
//! - colors the reference row according to each cell's outcome,
//! - records unacceptable cells in an attached [`ComparisonSummary`],
//! - inserts the measured row into the reference table after the current
//!   reference row whenever the row is not fully acceptable, carrying
//!   over base formats before overlaying the measured-side colors.
//!
//! [`differentiate_tables`] is the top-level entry point wiring registry
//! resolution, summary header seeding, and the streaming comparison
//! together.

use crate::compare::{compare_tables_streaming, CompareConfig, CompareError, RowDiff};
use crate::outcome::Outcome;
use crate::registry::ValidatorRegistry;
use crate::sink::RowSink;
use crate::summary::ComparisonSummary;
use crate::table::{ReferenceSide, TableEngine};
use crate::validator::Validator;
use crate::value::{CellFormat, CellValue};
use tracing::trace;

/// Streaming consumer that highlights and extends the reference table.
pub struct DiffConsumer<'a> {
    measured: &'a dyn TableEngine,
    summary: Option<&'a mut ComparisonSummary>,
    /// Reference column count at construction. Measured columns beyond
    /// this bound are structural excess, not content mismatches.
    reference_cols: u32,
}

impl<'a> DiffConsumer<'a> {
    pub fn new(
        measured: &'a dyn TableEngine,
        reference_cols: u32,
        summary: Option<&'a mut ComparisonSummary>,
    ) -> DiffConsumer<'a> {
        DiffConsumer {
            measured,
            summary,
            reference_cols,
        }
    }

    fn cell_at(values: &[CellValue], c: usize) -> CellValue {
        values.get(c).cloned().unwrap_or(CellValue::Empty)
    }
}

impl RowSink for DiffConsumer<'_> {
    fn accept(
        &mut self,
        diff: &RowDiff,
        reference: &mut ReferenceSide<'_>,
    ) -> Result<(), CompareError> {
        let mut okay = true;
        let mut formats_ref = Vec::with_capacity(diff.outcomes.len());
        let mut formats_mess = Vec::with_capacity(diff.outcomes.len());

        for (c, outcome) in diff.outcomes.iter().enumerate() {
            // Columns past the original reference width are always
            // structural excess.
            let outcome = if c as u32 >= self.reference_cols {
                Outcome::Longer
            } else {
                *outcome
            };

            okay = okay && outcome.ok();
            let colors = outcome.cell_colors();
            formats_ref.push(CellFormat::with_fill(colors.reference));
            formats_mess.push(CellFormat::with_fill(colors.measured));

            if outcome.foul() {
                if let Some(summary) = self.summary.as_deref_mut() {
                    summary.add(
                        diff.row,
                        c as u32 + 1,
                        Self::cell_at(&diff.values1, c),
                        Self::cell_at(&diff.values2, c),
                        outcome,
                    );
                }
            }
        }

        if diff.index2 > 0 {
            reference.set_row_formats(diff.index2 as u32, &formats_ref)?;
        }

        if !okay && !diff.values1.is_empty() {
            trace!(row = diff.row, "inserting measured row into reference");
            let mut base = if diff.index1 > 0 {
                self.measured.row_formats(diff.index1 as u32)
            } else if diff.index2 > 0 {
                reference.row_formats(diff.index2 as u32)
            } else {
                Vec::new()
            };
            base.resize(formats_mess.len(), CellFormat::default());
            for (fmt, overlay) in base.iter_mut().zip(&formats_mess) {
                if let Some(color) = overlay.fill_color.as_deref() {
                    fmt.apply_fill(color);
                }
            }

            let new_row = reference.insert_row(&diff.values1)?;
            reference.set_row_formats(new_row, &base)?;
        }

        Ok(())
    }
}

/// Compare two tables row by row, highlighting and extending the
/// reference table and feeding unacceptable cells into `summary`.
///
/// Validators resolve from the reference header row through `registry`;
/// when no registry is given, every column falls back to
/// [`Validator::Auto`]. The summary's header values are seeded from the
/// same header row.
pub fn differentiate_tables(
    measured: &dyn TableEngine,
    reference: &mut dyn TableEngine,
    registry: Option<&ValidatorRegistry>,
    mut summary: Option<&mut ComparisonSummary>,
    config: &CompareConfig,
) -> Result<(), CompareError> {
    let auto = ValidatorRegistry::with_default(Validator::Auto);
    let registry = registry.unwrap_or(&auto);

    let header = reference.row_values(1);
    let validators = registry.resolve_validators(&header, reference.max_col() as usize);
    if let Some(summary) = summary.as_deref_mut() {
        summary.set_header_values(header);
    }

    let reference_cols = reference.max_col();
    let mut consumer = DiffConsumer::new(measured, reference_cols, summary.as_deref_mut());
    compare_tables_streaming(measured, reference, &validators, config, &mut consumer)
}

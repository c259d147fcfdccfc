//! Sinks for streaming row comparisons.
//!
//! Streaming mode hands each compared row to a [`RowSink`] instead of
//! collecting everything in memory. The sink also receives a
//! [`ReferenceSide`] handle so consumers that color or extend the
//! reference table can do so while the iteration is in flight.

use crate::compare::{CompareError, RowDiff};
use crate::table::ReferenceSide;

/// Trait for consuming compared rows as they are produced.
pub trait RowSink {
    /// Called once before the first row.
    ///
    /// Default is a no-op so sinks without setup can ignore it.
    fn begin(&mut self) -> Result<(), CompareError> {
        Ok(())
    }

    /// Called once per compared row, in row order.
    fn accept(
        &mut self,
        diff: &RowDiff,
        reference: &mut ReferenceSide<'_>,
    ) -> Result<(), CompareError>;

    /// Called once after the last row.
    fn finish(&mut self) -> Result<(), CompareError> {
        Ok(())
    }
}

/// A sink that collects row diffs into a Vec.
#[derive(Debug, Default)]
pub struct VecSink {
    rows: Vec<RowDiff>,
}

impl VecSink {
    pub fn new() -> VecSink {
        VecSink { rows: Vec::new() }
    }

    pub fn into_rows(self) -> Vec<RowDiff> {
        self.rows
    }
}

impl RowSink for VecSink {
    fn accept(
        &mut self,
        diff: &RowDiff,
        _reference: &mut ReferenceSide<'_>,
    ) -> Result<(), CompareError> {
        self.rows.push(diff.clone());
        Ok(())
    }
}

/// A sink that forwards each row diff to a callback.
pub struct CallbackSink<F: FnMut(&RowDiff)> {
    f: F,
}

impl<F: FnMut(&RowDiff)> CallbackSink<F> {
    pub fn new(f: F) -> CallbackSink<F> {
        CallbackSink { f }
    }
}

impl<F: FnMut(&RowDiff)> RowSink for CallbackSink<F> {
    fn accept(
        &mut self,
        diff: &RowDiff,
        _reference: &mut ReferenceSide<'_>,
    ) -> Result<(), CompareError> {
        (self.f)(diff);
        Ok(())
    }
}

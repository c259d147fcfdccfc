//! Table Validate: tolerant cell-by-cell comparison of tabular data.
//!
//! This crate compares a "measured" table against a "reference" table and
//! classifies every cell pair into a typed [`Outcome`] capturing the
//! degree and kind of agreement, not just equality:
//! - Value normalization across type and locale boundaries (`normalize`)
//! - A closed set of comparison strategies ([`Validator`])
//! - Column-to-validator resolution ([`ValidatorRegistry`], [`RegistryStore`])
//! - A row-by-row orchestrator with bulk and streaming modes (`compare`)
//! - A diff consumer that colors and extends the reference table
//!   ([`DiffConsumer`]) and a result aggregation ([`ComparisonSummary`])
//!
//! # Quick Start
//!
//! ```
//! use table_validate::{
//!     differentiate_tables, CellValue, CompareConfig, ComparisonSummary, MemoryTable,
//!     Validator, ValidatorRegistry,
//! };
//!
//! let measured = MemoryTable::from_rows(vec![
//!     vec!["amount".into(), "ok".into()],
//!     vec!["5".into(), CellValue::Bool(true)],
//! ]);
//! let mut reference = MemoryTable::from_rows(vec![
//!     vec!["amount".into(), "ok".into()],
//!     vec![CellValue::Int(5), "ja".into()],
//! ]);
//!
//! let mut registry = ValidatorRegistry::with_default(Validator::Auto);
//! registry.register_by_name("ok", Validator::Bool);
//!
//! let mut summary = ComparisonSummary::new();
//! differentiate_tables(
//!     &measured,
//!     &mut reference,
//!     Some(&registry),
//!     Some(&mut summary),
//!     &CompareConfig::default(),
//! )?;
//!
//! assert_eq!(summary.total(), 0);
//! # Ok::<(), table_validate::CompareError>(())
//! ```

mod compare;
mod consumer;
mod error_codes;
mod normalize;
mod outcome;
mod registry;
mod sink;
mod summary;
mod table;
mod validator;
mod value;

pub use compare::{
    calculate_validator_array, compare_row, compare_tables, compare_tables_streaming,
    compare_tables_with_registry, CompareConfig, CompareConfigBuilder, CompareError, RowDiff,
    ValidatorOverrides,
};
pub use consumer::{differentiate_tables, DiffConsumer};
pub use normalize::{as_bool, as_datetime, as_float, as_int, as_number, is_bool_like};
pub use outcome::{CellColors, Outcome};
pub use registry::{RegistryStore, ValidatorRegistry};
pub use sink::{CallbackSink, RowSink, VecSink};
pub use summary::{ComparisonSummary, SummaryError, SummaryRecord};
pub use table::{EngineError, MemoryTable, ReferenceSide, RowCursor, TableEngine};
pub use validator::{DatePrecision, Validator};
pub use value::{CellFormat, CellValue};

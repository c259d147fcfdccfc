//! Column-to-validator resolution.
//!
//! A [`ValidatorRegistry`] maps column names and column indices to
//! [`Validator`]s for one table, with a default fallback, and resolves a
//! header row into a dense per-column validator list. A [`RegistryStore`]
//! maps sheet names to registries with its own default.

use crate::validator::Validator;
use crate::value::CellValue;
use rustc_hash::FxHashMap;

/// Per-table assignment of validators to columns.
///
/// Resolution precedence: explicit name match, then explicit index match,
/// then the default validator. Columns resolving to no validator at all
/// are reported as `OMITTED` by the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct ValidatorRegistry {
    by_column_name: FxHashMap<String, Validator>,
    by_column_index: FxHashMap<usize, Validator>,
    default_validator: Option<Validator>,
}

impl ValidatorRegistry {
    pub fn new() -> ValidatorRegistry {
        ValidatorRegistry::default()
    }

    /// A registry whose default is the given validator.
    pub fn with_default(validator: Validator) -> ValidatorRegistry {
        ValidatorRegistry {
            default_validator: Some(validator),
            ..ValidatorRegistry::default()
        }
    }

    /// Register a validator for a column by header name.
    pub fn register_by_name(&mut self, column_name: impl Into<String>, validator: Validator) {
        self.by_column_name.insert(column_name.into(), validator);
    }

    /// Register a validator for a column by zero-based index.
    pub fn register_by_index(&mut self, column_index: usize, validator: Validator) {
        self.by_column_index.insert(column_index, validator);
    }

    /// Set the fallback for columns without an explicit assignment.
    pub fn set_default(&mut self, validator: Validator) {
        self.default_validator = Some(validator);
    }

    pub fn default_validator(&self) -> Option<&Validator> {
        self.default_validator.as_ref()
    }

    /// Look up the validator for a column, by name first, then index,
    /// then the default.
    pub fn get_validator(
        &self,
        column_name: Option<&str>,
        column_index: Option<usize>,
    ) -> Option<&Validator> {
        if let Some(name) = column_name {
            if let Some(v) = self.by_column_name.get(name) {
                return Some(v);
            }
        }
        if let Some(index) = column_index {
            if let Some(v) = self.by_column_index.get(&index) {
                return Some(v);
            }
        }
        self.default_validator.as_ref()
    }

    /// Resolve a header row into a dense validator list, one entry per
    /// column and at least `min_cols` long.
    ///
    /// Header positions resolve by name/index/default; explicitly
    /// index-registered validators then override, extending the list
    /// (padded with the default) when their index lies beyond it.
    pub fn resolve_validators(
        &self,
        header_row: &[CellValue],
        min_cols: usize,
    ) -> Vec<Option<Validator>> {
        let len = header_row.len().max(min_cols);
        let mut validators: Vec<Option<Validator>> =
            vec![self.default_validator.clone(); len];

        for (index, cell) in header_row.iter().enumerate() {
            validators[index] = self
                .get_validator(cell.as_text(), Some(index))
                .cloned();
        }

        for (&index, validator) in &self.by_column_index {
            if index < validators.len() {
                validators[index] = Some(validator.clone());
            } else {
                while validators.len() < index {
                    validators.push(self.default_validator.clone());
                }
                validators.push(Some(validator.clone()));
            }
        }

        validators
    }
}

/// Sheet-name to registry mapping with a default fallback.
#[derive(Debug, Clone, Default)]
pub struct RegistryStore {
    by_sheet_name: FxHashMap<String, ValidatorRegistry>,
    default_registry: Option<ValidatorRegistry>,
}

impl RegistryStore {
    pub fn new() -> RegistryStore {
        RegistryStore::default()
    }

    /// Register a registry for a specific sheet.
    pub fn register(&mut self, sheet_name: impl Into<String>, registry: ValidatorRegistry) {
        self.by_sheet_name.insert(sheet_name.into(), registry);
    }

    /// Set the registry used for sheets without an explicit assignment.
    pub fn set_default(&mut self, registry: ValidatorRegistry) {
        self.default_registry = Some(registry);
    }

    /// The registry for a sheet, or the default when none is registered.
    pub fn get_registry(&self, sheet_name: &str) -> Option<&ValidatorRegistry> {
        self.by_sheet_name
            .get(sheet_name)
            .or(self.default_registry.as_ref())
    }
}

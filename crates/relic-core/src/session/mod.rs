//! Analysis session - explicit state replacing process-wide accumulators
//!
//! One session owns the cross-file CRUD map, the class registry, the symbol
//! table, and the error log. Components receive it by reference, which keeps
//! independent sessions isolated and makes parallel runs possible. Writes
//! are append-only and mutex-guarded.

mod log;
mod symbols;

pub use log::{ErrorKind, ErrorLog, ErrorLogEntry, ERROR_SINK_NAME};
pub use symbols::{SymbolInfo, SymbolKind, SymbolOrigin, SymbolTable};

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use rustc_hash::FxHashMap;

use crate::ast::ClassRecord;
use crate::patterns::CrudRecord;

/// Shared state for one analysis run
pub struct AnalysisSession {
    crud: Mutex<FxHashMap<String, Vec<CrudRecord>>>,
    classes: Mutex<Vec<ClassRecord>>,
    pub symbols: SymbolTable,
    pub errors: ErrorLog,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            crud: Mutex::new(FxHashMap::default()),
            classes: Mutex::new(Vec::new()),
            symbols: SymbolTable::new(),
            errors: ErrorLog::new(),
        }
    }

    /// Session whose error log is mirrored to the persistent sink under `root`.
    pub fn with_error_sink(root: &Path) -> Self {
        Self {
            crud: Mutex::new(FxHashMap::default()),
            classes: Mutex::new(Vec::new()),
            symbols: SymbolTable::new(),
            errors: ErrorLog::with_sink(root),
        }
    }

    /// Runtime-injection API: merge name→value pairs into the constant table.
    pub fn inject(&self, values: &HashMap<String, String>) {
        self.symbols.inject(values);
    }

    pub fn record_crud(&self, file: &str, records: &[CrudRecord]) {
        if records.is_empty() {
            return;
        }
        if let Ok(mut map) = self.crud.lock() {
            map.entry(file.to_string())
                .or_default()
                .extend_from_slice(records);
        }
    }

    pub fn register_classes(&self, records: &[ClassRecord]) {
        if records.is_empty() {
            return;
        }
        if let Ok(mut classes) = self.classes.lock() {
            classes.extend_from_slice(records);
        }
    }

    /// Snapshot of the project-wide file→CRUD multiset.
    pub fn crud_by_file(&self) -> FxHashMap<String, Vec<CrudRecord>> {
        self.crud.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Snapshot of every class registered so far.
    pub fn classes(&self) -> Vec<ClassRecord> {
        self.classes.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Clears the accumulators between independent runs. Injected symbols
    /// and the persistent error sink are kept.
    pub fn reset(&self) {
        if let Ok(mut map) = self.crud.lock() {
            map.clear();
        }
        if let Ok(mut classes) = self.classes.lock() {
            classes.clear();
        }
        self.errors.clear();
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

//! Project report - aggregate shapes handed to the external exporter
//!
//! Field names are the stable interface consumed by the reporting component.

use serde::Serialize;

use crate::analyzer::AnalysisResult;
use crate::patterns::{ConditionalQueryVariant, CrudRecord};
use crate::session::ErrorLogEntry;

/// Per-file dependency/query summary
#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub file: String,
    pub dependencies: Vec<String>,
    pub queries: Vec<String>,
}

/// Per-file CRUD sheet row
#[derive(Debug, Clone, Serialize)]
pub struct FileCrud {
    pub file: String,
    pub records: Vec<CrudRecord>,
}

/// Aggregate run statistics
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub files_analyzed: usize,
    pub failures: usize,
    pub duration_ms: u64,
}

/// Project-level analysis report
#[derive(Debug, Clone, Serialize)]
pub struct ProjectReport {
    pub root: String,
    pub files: Vec<FileSummary>,
    pub crud: Vec<FileCrud>,
    /// Referenced names known to be views
    pub views: Vec<String>,
    /// Referenced names known to be stored procedures
    pub procedures: Vec<String>,
    pub conditional: Vec<ConditionalQueryVariant>,
    pub results: Vec<AnalysisResult>,
    pub errors: Vec<ErrorLogEntry>,
    pub stats: RunStats,
}

impl ProjectReport {
    /// Serialized payload for the external reporting component.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

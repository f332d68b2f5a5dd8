//! Per-file analysis result

use serde::Serialize;

use crate::ast::{ClassRecord, FunctionRecord};
use crate::patterns::{ConditionalQueryVariant, CrudRecord, ExternalAccessRecord, MarkupElement};
use crate::scanner::Dialect;
use crate::sql::NormalizedQuery;

/// Everything extracted from one file.
///
/// Created fresh per `analyze_file` call and never mutated after return.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub file: String,
    pub dialect: Dialect,
    /// Resolved transitive include closure
    pub dependencies: Vec<String>,
    pub crud: Vec<CrudRecord>,
    pub queries: Vec<NormalizedQuery>,
    pub variants: Vec<ConditionalQueryVariant>,
    pub external: Vec<ExternalAccessRecord>,
    pub markup: Vec<MarkupElement>,
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
    pub success: bool,
    pub error: Option<String>,
}

impl AnalysisResult {
    pub fn new(file: String, dialect: Dialect) -> Self {
        Self {
            file,
            dialect,
            dependencies: Vec::new(),
            crud: Vec::new(),
            queries: Vec::new(),
            variants: Vec::new(),
            external: Vec::new(),
            markup: Vec::new(),
            functions: Vec::new(),
            classes: Vec::new(),
            success: true,
            error: None,
        }
    }

    pub fn failed(file: String, dialect: Dialect, message: String) -> Self {
        let mut result = Self::new(file, dialect);
        result.success = false;
        result.error = Some(message);
        result
    }
}

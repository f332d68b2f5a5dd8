//! relic-core: analysis engine for legacy web application codebases
//!
//! Given a project root mixing server-side scripts, client-side scripts, and
//! markup, this crate discovers source files, resolves their static include
//! graph, and extracts a structured inventory of data access and outward
//! network references:
//! - Scanner: file enumeration with dialect tagging
//! - Includes: transitive include/require closure (cycle safe)
//! - Sql: query normalization and table-name derivation
//! - Patterns: lexical CRUD, external-access, and conditional-query extraction
//! - Ast: tree-sitter visitor for the primary scripting dialect, with a
//!   lexical fallback for everything else and on parser failure
//! - Session: explicit cross-file state (CRUD map, class registry, symbol
//!   table, error log)
//! - Catalog: known view and stored-procedure reference lists
//! - Analyzer + Runner: per-file orchestration and the project-level report

pub mod scanner;
pub mod includes;
pub mod sql;
pub mod patterns;
pub mod ast;
pub mod session;
pub mod catalog;
pub mod analyzer;
pub mod runner;

// Re-exports for convenience
pub use scanner::{Dialect, ScanConfig, ScanResult, Scanner, SourceFile};
pub use includes::IncludeResolver;
pub use sql::{NormalizedQuery, SqlNormalizer};
pub use patterns::{
    AccessChannel, ConditionalQueryExtractor, ConditionalQueryVariant, CrudExtractor,
    CrudOperation, CrudRecord, ExternalAccessExtractor, ExternalAccessRecord,
    MarkupElement, MarkupExtractor, MarkupKind, ScriptStructureExtractor,
};
pub use ast::{
    AstExtraction, ClassRecord, FunctionRecord, LexicalFallback, ParseFailure,
    PhpTreeParser, ScriptParser, SyntaxTreeExtractor,
};
pub use session::{
    AnalysisSession, ErrorKind, ErrorLog, ErrorLogEntry, SymbolInfo, SymbolKind,
    SymbolOrigin, SymbolTable, ERROR_SINK_NAME,
};
pub use catalog::{CatalogError, ReferenceCatalog, TableOrigin};
pub use analyzer::{AnalysisResult, FileAnalyzer};
pub use runner::{FileCrud, FileSummary, ProjectReport, ProjectRunner, RunStats, RunnerConfig};

//! Project analysis runner - enumerates targets and aggregates the report
//!
//! Files are independent inputs, so analysis parallelizes at file
//! granularity; the session accumulators are the only shared sinks. A
//! fresh analyzer (and parser) is constructed per file since the underlying
//! tree-sitter parser is not shareable across threads. Single-file failures
//! are reported per file and never abort the run.

mod types;

pub use types::{FileCrud, FileSummary, ProjectReport, RunStats};

use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;

use crate::analyzer::{AnalysisResult, FileAnalyzer};
use crate::catalog::{ReferenceCatalog, TableOrigin};
use crate::scanner::{ScanConfig, Scanner, SourceFile};
use crate::session::{AnalysisSession, ErrorKind};

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub root: PathBuf,
    /// Include globs; empty analyzes every supported file
    pub patterns: Vec<String>,
    /// Analyze files in parallel at file granularity
    pub parallel: bool,
}

impl RunnerConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            patterns: Vec::new(),
            parallel: true,
        }
    }
}

/// Runs the full pipeline over a project root
pub struct ProjectRunner {
    config: RunnerConfig,
    catalog: ReferenceCatalog,
}

impl ProjectRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            catalog: ReferenceCatalog::empty(),
        }
    }

    pub fn with_catalog(config: RunnerConfig, catalog: ReferenceCatalog) -> Self {
        Self { config, catalog }
    }

    pub fn run(&self, session: &AnalysisSession) -> ProjectReport {
        let start = Instant::now();

        let scan = Scanner::new(ScanConfig {
            root: self.config.root.clone(),
            patterns: self.config.patterns.clone(),
            ..Default::default()
        })
        .scan();

        let mut results: Vec<AnalysisResult> = if self.config.parallel {
            scan.files
                .par_iter()
                .map(|file| analyze_one(session, file))
                .collect()
        } else {
            scan.files
                .iter()
                .map(|file| analyze_one(session, file))
                .collect()
        };
        // Results are keyed by path; sort for a deterministic report.
        results.sort_by(|a, b| a.file.cmp(&b.file));

        self.build_report(session, results, start.elapsed().as_millis() as u64)
    }

    fn build_report(
        &self,
        session: &AnalysisSession,
        results: Vec<AnalysisResult>,
        duration_ms: u64,
    ) -> ProjectReport {
        let files = results
            .iter()
            .map(|r| FileSummary {
                file: r.file.clone(),
                dependencies: r.dependencies.clone(),
                queries: r.queries.iter().map(|q| q.text.clone()).collect(),
            })
            .collect();

        let mut crud: Vec<FileCrud> = session
            .crud_by_file()
            .into_iter()
            .map(|(file, records)| FileCrud { file, records })
            .collect();
        crud.sort_by(|a, b| a.file.cmp(&b.file));

        let mut views: Vec<String> = Vec::new();
        let mut procedures: Vec<String> = Vec::new();
        let mut annotate = |name: &str| match self.catalog.classify(name) {
            TableOrigin::View => {
                if !views.iter().any(|v| v == name) {
                    views.push(name.to_string());
                }
            }
            TableOrigin::StoredProcedure => {
                if !procedures.iter().any(|p| p == name) {
                    procedures.push(name.to_string());
                }
            }
            TableOrigin::Table => {}
        };
        for sheet in &crud {
            for record in &sheet.records {
                annotate(&record.table);
            }
        }
        for result in &results {
            for query in &result.queries {
                for table in &query.tables {
                    annotate(table);
                }
            }
        }

        let conditional = results
            .iter()
            .flat_map(|r| r.variants.iter().cloned())
            .collect();

        let failures = results.iter().filter(|r| !r.success).count();
        let stats = RunStats {
            files_analyzed: results.len(),
            failures,
            duration_ms,
        };

        ProjectReport {
            root: self.config.root.display().to_string(),
            files,
            crud,
            views,
            procedures,
            conditional,
            results,
            errors: session.errors.entries(),
            stats,
        }
    }
}

fn analyze_one(session: &AnalysisSession, file: &SourceFile) -> AnalysisResult {
    match FileAnalyzer::new(session) {
        Ok(mut analyzer) => analyzer.analyze_file(&file.path),
        Err(e) => {
            session.errors.record(
                ErrorKind::ExtractionFailure,
                &file.relative,
                0,
                &e.to_string(),
            );
            AnalysisResult::failed(file.path.display().to_string(), file.dialect, e.to_string())
        }
    }
}

//! File analysis orchestrator - per-dialect dispatch and result assembly
//!
//! Tree extraction runs first for the primary dialect, with the lexical
//! fallback taking over on parse failure. Extraction errors are caught at
//! this boundary and surface as unsuccessful results; nothing escapes to
//! abort the run.

mod types;

pub use types::AnalysisResult;

use std::fs;
use std::path::Path;

use crate::ast::{LexicalFallback, ParseFailure, PhpTreeParser, ScriptParser, SyntaxTreeExtractor};
use crate::includes::IncludeResolver;
use crate::patterns::{
    ConditionalQueryExtractor, CrudExtractor, ExternalAccessExtractor, MarkupExtractor,
    ScriptStructureExtractor,
};
use crate::scanner::Dialect;
use crate::session::{AnalysisSession, ErrorKind};

/// Analyzes one file at a time against a shared session
pub struct FileAnalyzer<'s> {
    session: &'s AnalysisSession,
    parser: PhpTreeParser,
    tree_extractor: SyntaxTreeExtractor,
    fallback: LexicalFallback,
    crud: CrudExtractor,
    external: ExternalAccessExtractor,
    conditional: ConditionalQueryExtractor,
    script: ScriptStructureExtractor,
    markup: MarkupExtractor,
}

impl<'s> FileAnalyzer<'s> {
    pub fn new(session: &'s AnalysisSession) -> Result<Self, ParseFailure> {
        Ok(Self {
            session,
            parser: PhpTreeParser::new()?,
            tree_extractor: SyntaxTreeExtractor::new(),
            fallback: LexicalFallback::new(),
            crud: CrudExtractor::new(),
            external: ExternalAccessExtractor::new(),
            conditional: ConditionalQueryExtractor::new(),
            script: ScriptStructureExtractor::new(),
            markup: MarkupExtractor::new(),
        })
    }

    /// Analyze a single file. Missing or unreadable files produce an
    /// unsuccessful result; no error propagates out of this call.
    pub fn analyze_file(&mut self, path: &Path) -> AnalysisResult {
        let file = path.display().to_string();
        let dialect = Dialect::from_path(path);

        if !path.exists() {
            self.session
                .errors
                .record(ErrorKind::FileNotFound, &file, 0, "file does not exist");
            return AnalysisResult::failed(file, dialect, "file does not exist".to_string());
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                let message = format!("read failed: {}", e);
                self.session
                    .errors
                    .record(ErrorKind::FileReadFailure, &file, 0, &message);
                return AnalysisResult::failed(file, dialect, message);
            }
        };

        let mut result = AnalysisResult::new(file, dialect);

        // Dependency resolution runs for every dialect.
        let resolver = IncludeResolver::new(&self.session.symbols);
        result.dependencies = resolver
            .resolve(path, &content)
            .into_iter()
            .map(|p| p.display().to_string())
            .collect();

        if let Err(message) = self.extract(dialect, &content, &mut result) {
            self.session
                .errors
                .record(ErrorKind::ExtractionFailure, &result.file, 0, &message);
            result.success = false;
            result.error = Some(message);
        }

        self.session.record_crud(&result.file, &result.crud);
        self.session.register_classes(&result.classes);
        result
    }

    fn extract(
        &mut self,
        dialect: Dialect,
        content: &str,
        result: &mut AnalysisResult,
    ) -> Result<(), String> {
        match dialect {
            Dialect::Php => {
                match self.parser.parse(content) {
                    Ok(tree) => {
                        let extraction = self.tree_extractor.extract(&tree, content, &result.file);
                        result.functions = extraction.functions;
                        result.classes = extraction.classes;
                        result.queries = extraction.queries;
                        result.variants = extraction.variants;
                    }
                    Err(failure) => {
                        self.session.errors.record(
                            ErrorKind::SyntaxParseFailure,
                            &result.file,
                            0,
                            &failure.to_string(),
                        );
                        let extraction = self.fallback.extract(content, &result.file);
                        result.functions = extraction.functions;
                        result.classes = extraction.classes;
                        result.queries = extraction.queries;
                        // The textual branch matcher stands in for the visitor.
                        result.variants = self.conditional.extract(content, &result.file);
                    }
                }
                result.crud = self.crud.extract(content);
                result.external = self.external.extract(content);
            }
            Dialect::Js => {
                let (functions, classes) = self.script.extract(content, &result.file);
                result.functions = functions;
                result.classes = classes;
                result.external = self.external.extract(content);
            }
            Dialect::Html => {
                result.markup = self.markup.extract(content);
                result.external = self.external.extract(content);
            }
            Dialect::Other => {
                self.session.errors.record(
                    ErrorKind::UnsupportedDialect,
                    &result.file,
                    0,
                    "unsupported extension",
                );
                let extraction = self.fallback.extract(content, &result.file);
                result.functions = extraction.functions;
                result.classes = extraction.classes;
                result.queries = extraction.queries;
                result.crud = self.crud.extract(content);
                result.external = self.external.extract(content);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_fails_fast() {
        let session = AnalysisSession::new();
        let mut analyzer = FileAnalyzer::new(&session).unwrap();
        let result = analyzer.analyze_file(Path::new("/no/such/file.php"));

        assert!(!result.success);
        assert_eq!(session.errors.count(ErrorKind::FileNotFound), 1);
    }

    #[test]
    fn test_php_file_extraction() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("page.php");
        fs::write(
            &path,
            "<?php\nfunction load($id) { }\nif ($id > 0) { $q = 'SELECT * FROM users'; }\n",
        )
        .unwrap();

        let session = AnalysisSession::new();
        let mut analyzer = FileAnalyzer::new(&session).unwrap();
        let result = analyzer.analyze_file(&path);

        assert!(result.success);
        assert_eq!(result.functions.len(), 1);
        assert_eq!(result.variants.len(), 1);
        assert_eq!(result.variants[0].conditions, vec!["$id > 0"]);
        assert_eq!(result.crud.len(), 1);
        assert_eq!(result.crud[0].table, "users");

        // CRUD is mirrored into the session accumulator
        let map = session.crud_by_file();
        assert_eq!(map.get(&result.file).map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_parse_failure_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.php");
        fs::write(
            &path,
            "<?php\nfunction broken($a) { return $a; }\nif (\nclass Foo {}\n",
        )
        .unwrap();

        let session = AnalysisSession::new();
        let mut analyzer = FileAnalyzer::new(&session).unwrap();
        let result = analyzer.analyze_file(&path);

        assert!(result.success);
        assert!(!result.functions.is_empty());
        assert_eq!(session.errors.count(ErrorKind::SyntaxParseFailure), 1);
    }

    #[test]
    fn test_unsupported_dialect_logged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.cgi");
        fs::write(&path, "function legacy_report($x) { }").unwrap();

        let session = AnalysisSession::new();
        let mut analyzer = FileAnalyzer::new(&session).unwrap();
        let result = analyzer.analyze_file(&path);

        assert!(result.success);
        assert_eq!(result.dialect, Dialect::Other);
        assert_eq!(result.functions.len(), 1);
        assert_eq!(session.errors.count(ErrorKind::UnsupportedDialect), 1);
    }
}

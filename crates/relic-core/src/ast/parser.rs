//! Script parser capability - injected syntax-tree producer
//!
//! The extractor is written against the `ScriptParser` interface so any
//! conformant parser implementation can be substituted for the bundled
//! tree-sitter one.

use thiserror::Error;
use tree_sitter::{Parser, Tree};

/// Parse failure - non-fatal, triggers the lexical fallback
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ParseFailure {
    pub message: String,
}

impl ParseFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Produces a syntax tree for primary-dialect source text
pub trait ScriptParser {
    fn parse(&mut self, source: &str) -> Result<Tree, ParseFailure>;
}

/// Primary-dialect parser backed by tree-sitter-php
pub struct PhpTreeParser {
    parser: Parser,
}

impl PhpTreeParser {
    pub fn new() -> Result<Self, ParseFailure> {
        let mut parser = Parser::new();
        let language = tree_sitter_php::LANGUAGE_PHP;
        parser
            .set_language(&language.into())
            .map_err(|e| ParseFailure::new(format!("failed to set language: {}", e)))?;
        Ok(Self { parser })
    }
}

impl ScriptParser for PhpTreeParser {
    fn parse(&mut self, source: &str) -> Result<Tree, ParseFailure> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParseFailure::new("parser produced no tree"))?;
        // A tree containing error nodes counts as a failed parse so heavily
        // malformed sources reach the lexical fallback instead.
        if tree.root_node().has_error() {
            return Err(ParseFailure::new("syntax errors in source"));
        }
        Ok(tree)
    }
}

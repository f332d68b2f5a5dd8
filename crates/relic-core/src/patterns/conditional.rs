//! Conditional query extraction - textual if/else branch matcher
//!
//! Single-level, non-nesting-aware span matching: nested braces inside a
//! branch body are not guaranteed to match correctly. The syntax-tree
//! visitor is the canonical implementation for nested conditions; this
//! matcher runs only when no formal tree is available.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::ConditionalQueryVariant;
use crate::sql::SqlNormalizer;

static IF_ELSE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\bif\s*\(([^)]+)\)\s*\{(.*?)\}(?:\s*else\s*\{(.*?)\})?").unwrap()
});

static QUERY_ASSIGN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)\$\w+\s*=\s*(?:'([^']*)'|"([^"]*)")\s*;"#).unwrap());

/// Extracts query literals from textual if/else branch bodies
pub struct ConditionalQueryExtractor {
    normalizer: SqlNormalizer,
}

impl ConditionalQueryExtractor {
    pub fn new() -> Self {
        Self {
            normalizer: SqlNormalizer::new(),
        }
    }

    pub fn extract(&self, text: &str, file: &str) -> Vec<ConditionalQueryVariant> {
        let mut variants = Vec::new();
        for cap in IF_ELSE_BLOCK.captures_iter(text) {
            let condition = cap[1].trim().to_string();
            if let Some(body) = cap.get(2) {
                self.collect(body.as_str(), &condition, file, &mut variants);
            }
            if let Some(else_body) = cap.get(3) {
                self.collect(else_body.as_str(), "else", file, &mut variants);
            }
        }
        variants
    }

    fn collect(
        &self,
        body: &str,
        condition: &str,
        file: &str,
        out: &mut Vec<ConditionalQueryVariant>,
    ) {
        for cap in QUERY_ASSIGN.captures_iter(body) {
            let literal = cap
                .get(1)
                .or_else(|| cap.get(2))
                .map(|m| m.as_str())
                .unwrap_or("");
            if self.normalizer.looks_like_sql(literal) {
                out.push(ConditionalQueryVariant {
                    conditions: vec![condition.to_string()],
                    query: self.normalizer.query(literal),
                    file: file.to_string(),
                });
            }
        }
    }
}

impl Default for ConditionalQueryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

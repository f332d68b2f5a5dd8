//! Lexical fallback extraction - keyword-adjacent discovery used when no
//! syntax tree is available

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{AstExtraction, ClassRecord, FunctionRecord};
use crate::sql::SqlNormalizer;

static FUNCTION_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bfunction\s+&?([A-Za-z_]\w*)\s*\(([^){]*)\)?").unwrap());

static CLASS_DECL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bclass\s+([A-Za-z_]\w*)").unwrap());

static QUERY_ASSIGN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\$\w+\s*=\s*(?:'([^']*)'|"([^"]*)")"#).unwrap());

/// Recovers declarations and queries from unparsable or unsupported sources
pub struct LexicalFallback {
    normalizer: SqlNormalizer,
}

impl LexicalFallback {
    pub fn new() -> Self {
        Self {
            normalizer: SqlNormalizer::new(),
        }
    }

    pub fn extract(&self, text: &str, file: &str) -> AstExtraction {
        let mut out = AstExtraction::default();

        for cap in FUNCTION_DECL.captures_iter(text) {
            let parameters = cap
                .get(2)
                .map(|m| m.as_str())
                .unwrap_or("")
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(|p| p.split_whitespace().last().unwrap_or(p).to_string())
                .collect();
            out.functions.push(FunctionRecord {
                name: cap[1].to_string(),
                file: file.to_string(),
                parameters,
            });
        }

        for cap in CLASS_DECL.captures_iter(text) {
            out.classes.push(ClassRecord {
                name: cap[1].to_string(),
                file: file.to_string(),
                methods: Vec::new(),
            });
        }

        for cap in QUERY_ASSIGN.captures_iter(text) {
            let literal = cap
                .get(1)
                .or_else(|| cap.get(2))
                .map(|m| m.as_str())
                .unwrap_or("");
            if self.normalizer.looks_like_sql(literal) {
                out.queries.push(self.normalizer.query(literal));
            }
        }

        out
    }
}

impl Default for LexicalFallback {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_on_malformed_source() {
        let fallback = LexicalFallback::new();
        let text = "<?php function broken($a, int $b) { return; }\nif (\nclass Orphan {";
        let out = fallback.extract(text, "broken.php");

        assert_eq!(out.functions.len(), 1);
        assert_eq!(out.functions[0].name, "broken");
        assert_eq!(out.functions[0].parameters, vec!["$a", "$b"]);
        assert_eq!(out.classes.len(), 1);
        assert_eq!(out.classes[0].name, "Orphan");
    }

    #[test]
    fn test_query_discovery() {
        let fallback = LexicalFallback::new();
        let out = fallback.extract(
            "$sql = 'SELECT * FROM users'; $label = 'not a query';",
            "a.php",
        );
        assert_eq!(out.queries.len(), 1);
        assert_eq!(out.queries[0].tables, vec!["users"]);
    }
}

//! SQL normalizer - canonicalizes raw query text and derives table names
//!
//! Normalization is idempotent: whitespace collapse, comment stripping,
//! whole-word keyword upper-casing, and trailing terminator removal all
//! leave an already-normalized query unchanged.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};

/// Canonical SQL text plus the ordered set of distinct tables it references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedQuery {
    pub text: String,
    /// First-seen order, case-sensitive, backtick-stripped
    pub tables: Vec<String>,
}

/// Keywords upper-cased during normalization (whole-word, case-insensitive)
const KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "INSERT", "INTO", "VALUES", "UPDATE", "SET", "DELETE", "JOIN",
];

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"--[^\r\n]*").unwrap());

static FROM_TABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bFROM\s+`?([A-Za-z_][\w.]*)").unwrap());
static JOIN_TABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bJOIN\s+`?([A-Za-z_][\w.]*)").unwrap());
static UPDATE_TABLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bUPDATE\s+`?([A-Za-z_][\w.]*)").unwrap());
static INTO_TABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bINTO\s+`?([A-Za-z_][\w.]*)").unwrap());

/// Canonicalizes SQL text and derives referenced table names
pub struct SqlNormalizer {
    keywords: Vec<Regex>,
    sql_shapes: RegexSet,
}

impl SqlNormalizer {
    pub fn new() -> Self {
        let keywords = KEYWORDS
            .iter()
            .map(|kw| Regex::new(&format!(r"(?i)\b{}\b", kw)).unwrap())
            .collect();
        // Statement shapes used to decide whether a string literal is a query
        let sql_shapes = RegexSet::new([
            r"(?i)SELECT\s+.+\s+FROM\s+\S+",
            r"(?i)INSERT\s+INTO\s+\S+",
            r"(?i)UPDATE\s+\S+\s+SET\b",
            r"(?i)DELETE\s+FROM\s+\S+",
        ])
        .unwrap();
        Self {
            keywords,
            sql_shapes,
        }
    }

    /// True when the text carries at least one recognizable SQL statement shape.
    pub fn looks_like_sql(&self, text: &str) -> bool {
        self.sql_shapes.is_match(text)
    }

    /// Canonicalize raw SQL text.
    pub fn normalize(&self, raw: &str) -> String {
        let mut sql = WHITESPACE.replace_all(raw.trim(), " ").into_owned();
        sql = BLOCK_COMMENT.replace_all(&sql, " ").into_owned();
        sql = LINE_COMMENT.replace_all(&sql, "").into_owned();
        for (re, kw) in self.keywords.iter().zip(KEYWORDS) {
            sql = re.replace_all(&sql, *kw).into_owned();
        }
        let mut sql = WHITESPACE.replace_all(sql.trim(), " ").trim().to_string();
        while sql.ends_with(';') {
            sql.pop();
            let trimmed = sql.trim_end().len();
            sql.truncate(trimmed);
        }
        sql
    }

    /// Ordered distinct table names referenced by a normalized query.
    ///
    /// Applies, in fixed order: one FROM capture, every JOIN capture, one
    /// UPDATE-target capture, one INTO-target capture.
    pub fn extract_tables(&self, sql: &str) -> Vec<String> {
        let mut tables = Vec::new();
        if let Some(cap) = FROM_TABLE.captures(sql) {
            push_table(&mut tables, &cap[1]);
        }
        for cap in JOIN_TABLE.captures_iter(sql) {
            push_table(&mut tables, &cap[1]);
        }
        if let Some(cap) = UPDATE_TABLE.captures(sql) {
            push_table(&mut tables, &cap[1]);
        }
        if let Some(cap) = INTO_TABLE.captures(sql) {
            push_table(&mut tables, &cap[1]);
        }
        tables
    }

    /// Normalize and derive tables in one step.
    pub fn query(&self, raw: &str) -> NormalizedQuery {
        let text = self.normalize(raw);
        let tables = self.extract_tables(&text);
        NormalizedQuery { text, tables }
    }
}

impl Default for SqlNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn push_table(tables: &mut Vec<String>, name: &str) {
    let name = name.trim_matches('`').trim();
    if !name.is_empty() && !tables.iter().any(|t| t == name) {
        tables.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_and_uppercases() {
        let normalizer = SqlNormalizer::new();
        let sql = normalizer.normalize("select  *\n from\tusers  where id = 1 ;");
        assert_eq!(sql, "SELECT * FROM users WHERE id = 1");
    }

    #[test]
    fn test_normalize_strips_comments() {
        let normalizer = SqlNormalizer::new();
        let sql = normalizer.normalize("SELECT * FROM users /* all rows */ WHERE id = 1 -- trailing");
        assert_eq!(sql, "SELECT * FROM users WHERE id = 1");
    }

    #[test]
    fn test_normalize_idempotent() {
        let normalizer = SqlNormalizer::new();
        let inputs = [
            "select * from `users`;",
            "  INSERT   INTO logs\n VALUES (1); ",
            "update t set a = 1 -- note",
            "DELETE FROM t1;;",
        ];
        for input in inputs {
            let once = normalizer.normalize(input);
            assert_eq!(normalizer.normalize(&once), once);
        }
    }

    #[test]
    fn test_extract_tables_order_and_dedup() {
        let normalizer = SqlNormalizer::new();
        let tables =
            normalizer.extract_tables("SELECT * FROM orders JOIN customers ON o.id = c.id");
        assert_eq!(tables, vec!["orders", "customers"]);

        let tables = normalizer.extract_tables("SELECT * FROM t1 JOIN t1 ON a = b");
        assert_eq!(tables, vec!["t1"]);
    }

    #[test]
    fn test_extract_tables_update_and_into() {
        let normalizer = SqlNormalizer::new();
        assert_eq!(
            normalizer.extract_tables("UPDATE users SET name = 'x'"),
            vec!["users"]
        );
        assert_eq!(
            normalizer.extract_tables("INSERT INTO `logs` VALUES (1)"),
            vec!["logs"]
        );
    }

    #[test]
    fn test_looks_like_sql() {
        let normalizer = SqlNormalizer::new();
        assert!(normalizer.looks_like_sql("SELECT id FROM users"));
        assert!(normalizer.looks_like_sql("delete from logs where id = 1"));
        assert!(!normalizer.looks_like_sql("hello world"));
        assert!(!normalizer.looks_like_sql("/api/items"));
    }
}

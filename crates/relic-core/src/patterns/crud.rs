//! CRUD table extraction - lexical detection of table references
//!
//! Four independent regex families, one per operation. The table is the
//! first whitespace/semicolon-delimited token after the keyword,
//! backtick-stripped. Every match is recorded, duplicates included.

use regex::Regex;

use super::types::{CrudOperation, CrudRecord};

/// Detects (table, operation) pairs in SQL-bearing text
pub struct CrudExtractor {
    select: Regex,
    insert: Regex,
    update: Regex,
    delete: Regex,
}

impl CrudExtractor {
    pub fn new() -> Self {
        Self {
            select: Regex::new(r#"(?is)\bSELECT\b.+?\bFROM\s+([^\s;,()'"]+)"#).unwrap(),
            insert: Regex::new(r#"(?i)\bINSERT\s+INTO\s+([^\s;,()'"]+)"#).unwrap(),
            update: Regex::new(r#"(?i)\bUPDATE\s+([^\s;,()'"]+)"#).unwrap(),
            delete: Regex::new(r#"(?i)\bDELETE\s+FROM\s+([^\s;,()'"]+)"#).unwrap(),
        }
    }

    pub fn extract(&self, text: &str) -> Vec<CrudRecord> {
        let mut records = Vec::new();
        let families = [
            (&self.select, CrudOperation::Select),
            (&self.insert, CrudOperation::Insert),
            (&self.update, CrudOperation::Update),
            (&self.delete, CrudOperation::Delete),
        ];
        for (re, operation) in families {
            for cap in re.captures_iter(text) {
                let table = cap[1].trim_matches('`').trim().to_string();
                if !table.is_empty() {
                    records.push(CrudRecord { table, operation });
                }
            }
        }
        records
    }
}

impl Default for CrudExtractor {
    fn default() -> Self {
        Self::new()
    }
}

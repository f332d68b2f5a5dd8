//! Sub-script structural extraction - function and class discovery in
//! client-side script via keyword-adjacent patterns

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{ClassRecord, FunctionRecord};

static FUNCTION_DECL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bfunction\s+([A-Za-z_$][\w$]*)\s*\(([^)]*)\)").unwrap());

static ARROW_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=\s*(?:async\s+)?(?:function\b|\([^)]*\)\s*=>|[A-Za-z_$][\w$]*\s*=>)",
    )
    .unwrap()
});

static CLASS_DECL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bclass\s+([A-Za-z_$][\w$]*)").unwrap());

/// Discovers function and class declarations in sub-script sources
pub struct ScriptStructureExtractor;

impl ScriptStructureExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str, file: &str) -> (Vec<FunctionRecord>, Vec<ClassRecord>) {
        let mut functions = Vec::new();
        for cap in FUNCTION_DECL.captures_iter(text) {
            let parameters = cap[2]
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
            functions.push(FunctionRecord {
                name: cap[1].to_string(),
                file: file.to_string(),
                parameters,
            });
        }
        for cap in ARROW_DECL.captures_iter(text) {
            functions.push(FunctionRecord {
                name: cap[1].to_string(),
                file: file.to_string(),
                parameters: Vec::new(),
            });
        }

        let classes = CLASS_DECL
            .captures_iter(text)
            .map(|cap| ClassRecord {
                name: cap[1].to_string(),
                file: file.to_string(),
                methods: Vec::new(),
            })
            .collect();

        (functions, classes)
    }
}

impl Default for ScriptStructureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

//! Include resolver - transitive include/require closure
//!
//! Scans content with two directive patterns (plain and `_once` variants),
//! resolves each literal argument against the including file's directory,
//! and recursively expands every candidate that exists on disk. A
//! per-traversal visited set guards against mutually-including files.
//! Arguments that stay dynamic after constant substitution are skipped
//! silently, as are candidates that resolve to nothing on disk.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

use crate::session::SymbolTable;

static PLAIN_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)\b(?:include|require)\b\s*\(?\s*([^;\r\n]+)").unwrap());

static ONCE_DIRECTIVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)\b(?:include_once|require_once)\b\s*\(?\s*([^;\r\n]+)").unwrap());

// Pieces of a directive argument: quoted literals, directory-self tokens,
// variables (dynamic, unresolvable), bare constant names.
static ARG_PIECE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"'([^']*)'|"([^"]*)"|dirname\s*\(\s*__FILE__\s*\)|__DIR__|\$\w+|[A-Za-z_][A-Za-z0-9_]*"#)
        .unwrap()
});

/// Resolves static include references into a deduplicated file set
pub struct IncludeResolver<'a> {
    symbols: &'a SymbolTable,
}

impl<'a> IncludeResolver<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self { symbols }
    }

    /// Transitive include closure for `file`, deduplicated in discovery order.
    pub fn resolve(&self, file: &Path, content: &str) -> Vec<PathBuf> {
        let mut visited = FxHashSet::default();
        let mut resolved = Vec::new();
        visited.insert(file.to_path_buf());
        self.expand(file, file, content, &mut visited, &mut resolved);
        resolved
    }

    fn expand(
        &self,
        root: &Path,
        file: &Path,
        content: &str,
        visited: &mut FxHashSet<PathBuf>,
        resolved: &mut Vec<PathBuf>,
    ) {
        let base = file.parent().unwrap_or_else(|| Path::new("")).to_path_buf();

        let mut targets = Vec::new();
        for re in [&*PLAIN_DIRECTIVE, &*ONCE_DIRECTIVE] {
            for cap in re.captures_iter(content) {
                if let Some(path) = self.resolve_target(&base, cap[1].trim()) {
                    targets.push(path);
                }
            }
        }

        for path in targets {
            if !path.exists() || path == root {
                continue;
            }
            if !resolved.contains(&path) {
                resolved.push(path.clone());
            }
            if visited.insert(path.clone()) {
                if let Ok(text) = fs::read_to_string(&path) {
                    self.expand(root, &path, &text, visited, resolved);
                }
            }
        }
    }

    /// Resolve one directive argument to a candidate path.
    fn resolve_target(&self, base: &Path, arg: &str) -> Option<PathBuf> {
        let arg = arg.trim().trim_end_matches(')').trim();
        let base_str = base.to_string_lossy();

        let mut joined = String::new();
        for cap in ARG_PIECE.captures_iter(arg) {
            if let Some(m) = cap.get(1).or_else(|| cap.get(2)) {
                joined.push_str(m.as_str());
                continue;
            }
            let token = cap.get(0).map(|m| m.as_str()).unwrap_or("");
            if token == "__DIR__" || token.starts_with("dirname") {
                joined.push_str(&base_str);
            } else if token.starts_with('$') {
                // dynamic argument, not statically resolvable
                return None;
            } else if let Some(value) = self.symbols.constant_value(token) {
                joined.push_str(&value);
            } else {
                return None;
            }
        }
        if joined.is_empty() {
            return None;
        }

        let joined = collapse_separators(&joined);
        let path = Path::new(&joined);
        if path.is_absolute() {
            return Some(path.to_path_buf());
        }
        let direct = base.join(path);
        if direct.exists() {
            return Some(direct);
        }
        let in_includes = base.join("includes").join(path.file_name()?);
        if in_includes.exists() {
            return Some(in_includes);
        }
        // best-effort candidate; the caller drops it if nothing exists there
        Some(direct)
    }
}

fn collapse_separators(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_was_separator = false;
    for c in path.chars() {
        if c == '/' {
            if !previous_was_separator {
                out.push(c);
            }
            previous_was_separator = true;
        } else {
            out.push(c);
            previous_was_separator = false;
        }
    }
    out
}

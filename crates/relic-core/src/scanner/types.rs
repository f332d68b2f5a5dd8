//! Scanner types - source file enumeration structures

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Source dialect of a file, derived from its extension.
///
/// Selects which extraction path runs for the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Primary server-side scripting dialect, including legacy include files
    Php,
    /// Client-side script
    Js,
    /// Markup documents
    Html,
    /// Anything else - analyzed with the lexical fallback only
    Other,
}

impl Dialect {
    pub fn from_path(path: &Path) -> Self {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext.to_lowercase().as_str() {
            "php" | "phtml" | "php3" | "php4" | "php5" | "inc" => Dialect::Php,
            "js" | "mjs" => Dialect::Js,
            "html" | "htm" => Dialect::Html,
            _ => Dialect::Other,
        }
    }

    /// Whether the project scanner enumerates this file at all.
    pub fn is_supported(path: &Path) -> bool {
        !matches!(Self::from_path(path), Dialect::Other)
    }
}

/// Configuration for the scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root directory to scan
    pub root: PathBuf,
    /// Glob patterns to include (e.g. "**/*.php"); empty means every supported file
    pub patterns: Vec<String>,
    /// Maximum file size to process (bytes)
    pub max_file_size: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            patterns: vec![],
            max_file_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// A file selected for analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    /// Absolute path
    pub path: PathBuf,
    /// Path relative to the scan root
    pub relative: String,
    /// Source dialect derived from the extension
    pub dialect: Dialect,
    /// File size in bytes
    pub size: u64,
}

/// Result of a scan operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Root directory that was scanned
    pub root: String,
    /// All files found, sorted by relative path
    pub files: Vec<SourceFile>,
    /// Any errors encountered (non-fatal)
    pub errors: Vec<String>,
}

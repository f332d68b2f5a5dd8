//! File walker - filesystem traversal with include globs
//!
//! Skips vendored and VCS directories, keeps files whose extension maps to a
//! known dialect, and applies the configured include patterns.

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::{DirEntry, WalkDir};

use super::types::{Dialect, ScanConfig, ScanResult, SourceFile};

/// Directories that never contain analyzable application sources.
const DEFAULT_IGNORES: &[&str] = &[
    ".git", ".svn", ".hg", "node_modules", "vendor", ".idea", "dist", "build",
];

/// Enumerates source files under a configured root
pub struct Scanner {
    config: ScanConfig,
    include_globs: GlobSet,
}

impl Scanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in &config.patterns {
            if let Ok(glob) = Glob::new(pattern) {
                builder.add(glob);
            }
        }
        let include_globs = builder
            .build()
            .unwrap_or_else(|_| GlobSetBuilder::new().build().unwrap());

        Self {
            config,
            include_globs,
        }
    }

    /// Walk the root and return every analyzable file.
    pub fn scan(&self) -> ScanResult {
        let mut files = Vec::new();
        let mut errors = Vec::new();

        let walker = WalkDir::new(&self.config.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !is_ignored_dir(e));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    errors.push(e.to_string());
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !Dialect::is_supported(path) {
                continue;
            }
            let relative = path
                .strip_prefix(&self.config.root)
                .unwrap_or(path)
                .to_string_lossy()
                .to_string();
            if !self.include_globs.is_empty() && !self.include_globs.is_match(&relative) {
                continue;
            }
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            if size > self.config.max_file_size {
                continue;
            }
            files.push(SourceFile {
                path: path.to_path_buf(),
                relative,
                dialect: Dialect::from_path(path),
                size,
            });
        }

        files.sort_by(|a, b| a.relative.cmp(&b.relative));

        ScanResult {
            root: self.config.root.display().to_string(),
            files,
            errors,
        }
    }
}

fn is_ignored_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .map_or(false, |name| DEFAULT_IGNORES.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("b.php"), "<?php").unwrap();
        fs::write(root.join("a.js"), "var x;").unwrap();
        fs::write(root.join("notes.txt"), "skip me").unwrap();
        fs::create_dir(root.join("vendor")).unwrap();
        fs::write(root.join("vendor/lib.php"), "<?php").unwrap();

        let scanner = Scanner::new(ScanConfig {
            root: root.to_path_buf(),
            ..Default::default()
        });
        let result = scanner.scan();

        let names: Vec<&str> = result.files.iter().map(|f| f.relative.as_str()).collect();
        assert_eq!(names, vec!["a.js", "b.php"]);
        assert_eq!(result.files[1].dialect, Dialect::Php);
    }

    #[test]
    fn test_scan_with_include_pattern() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("a.php"), "<?php").unwrap();
        fs::write(root.join("b.js"), "var x;").unwrap();

        let scanner = Scanner::new(ScanConfig {
            root: root.to_path_buf(),
            patterns: vec!["**/*.php".to_string()],
            ..Default::default()
        });
        let result = scanner.scan();
        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].relative, "a.php");
    }
}

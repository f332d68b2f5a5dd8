//! Reference catalog - known view and stored-procedure name lists
//!
//! Two newline-delimited text files, `#` prefixing comment lines. Loaded
//! once at construction and used to annotate extracted table references.

use std::fs;
use std::io;
use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read reference list {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Classification of a referenced name against the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableOrigin {
    Table,
    View,
    StoredProcedure,
}

/// Known view and stored-procedure names
pub struct ReferenceCatalog {
    views: FxHashSet<String>,
    procedures: FxHashSet<String>,
}

impl ReferenceCatalog {
    /// Catalog with no known names; everything classifies as a plain table.
    pub fn empty() -> Self {
        Self {
            views: FxHashSet::default(),
            procedures: FxHashSet::default(),
        }
    }

    pub fn load(views_path: &Path, procedures_path: &Path) -> Result<Self, CatalogError> {
        Ok(Self {
            views: load_list(views_path)?,
            procedures: load_list(procedures_path)?,
        })
    }

    pub fn classify(&self, name: &str) -> TableOrigin {
        if self.views.contains(name) {
            TableOrigin::View
        } else if self.procedures.contains(name) {
            TableOrigin::StoredProcedure
        } else {
            TableOrigin::Table
        }
    }

    pub fn is_view(&self, name: &str) -> bool {
        self.views.contains(name)
    }

    pub fn is_procedure(&self, name: &str) -> bool {
        self.procedures.contains(name)
    }
}

fn load_list(path: &Path) -> Result<FxHashSet<String>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

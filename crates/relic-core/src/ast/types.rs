//! Syntax tree extraction types

use serde::{Deserialize, Serialize};

use crate::patterns::ConditionalQueryVariant;
use crate::sql::NormalizedQuery;

/// A function or method declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub name: String,
    pub file: String,
    /// Formal parameter names
    pub parameters: Vec<String>,
}

/// A class declaration and the methods registered under it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRecord {
    pub name: String,
    pub file: String,
    pub methods: Vec<String>,
}

/// Everything the tree visitor (or the lexical fallback) collects from one file
#[derive(Debug, Clone, Default, Serialize)]
pub struct AstExtraction {
    pub functions: Vec<FunctionRecord>,
    pub classes: Vec<ClassRecord>,
    pub queries: Vec<NormalizedQuery>,
    pub variants: Vec<ConditionalQueryVariant>,
}

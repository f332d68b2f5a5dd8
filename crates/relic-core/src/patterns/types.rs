//! Pattern extraction types - facts recovered from raw source text

use serde::{Deserialize, Serialize};

use crate::sql::NormalizedQuery;

/// A (table, operation) fact extracted from SQL-bearing text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrudRecord {
    pub table: String,
    pub operation: CrudOperation,
}

/// Operation performed on a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CrudOperation {
    Select,
    Insert,
    Update,
    Delete,
}

/// Outward network/navigation channel kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessChannel {
    ApiCall,
    ExternalLink,
    FormSubmission,
    IframeEmbed,
    Redirect,
    WindowOpen,
}

/// An outward-facing access detected in script or markup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalAccessRecord {
    pub channel: AccessChannel,
    /// Target URL or path string
    pub target: String,
    /// Best-effort line of the first textual occurrence of the target
    pub line: u32,
}

/// A query literal discovered along one control-flow branch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionalQueryVariant {
    /// Enclosing condition expressions, outer to inner; `else` marks else bodies
    pub conditions: Vec<String>,
    pub query: NormalizedQuery,
    pub file: String,
}

/// Kind of element inventoried from markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupKind {
    Link,
    Form,
    Script,
    Image,
}

/// A navigational or embedded element found in a markup document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkupElement {
    pub kind: MarkupKind,
    pub target: String,
    pub line: u32,
}

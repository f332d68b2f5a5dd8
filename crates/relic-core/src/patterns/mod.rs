//! Pattern extractors - independent lexical scanners over raw source text
//!
//! Each extractor is a pure function over text driven by a fixed, ordered
//! list of pre-compiled patterns. The syntax-tree visitor in `ast` is
//! preferred for anything structural; these run on dialects that have no
//! formal tree and as fallbacks when parsing fails.

mod conditional;
mod crud;
mod external;
mod markup;
mod script;
mod types;

pub use conditional::ConditionalQueryExtractor;
pub use crud::CrudExtractor;
pub use external::ExternalAccessExtractor;
pub use markup::MarkupExtractor;
pub use script::ScriptStructureExtractor;
pub use types::{
    AccessChannel, ConditionalQueryVariant, CrudOperation, CrudRecord, ExternalAccessRecord,
    MarkupElement, MarkupKind,
};

/// 1-based line of the first occurrence of `target`, 0 when absent.
///
/// Duplicate targets elsewhere in the file resolve to the first line; this is
/// cosmetic positioning, not true source tracking.
pub(crate) fn first_occurrence_line(text: &str, target: &str) -> u32 {
    for (i, line) in text.lines().enumerate() {
        if line.contains(target) {
            return (i + 1) as u32;
        }
    }
    0
}

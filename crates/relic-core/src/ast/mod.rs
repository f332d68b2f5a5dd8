//! Syntax tree extraction - injected parser, tree visitor, lexical fallback
//!
//! The primary scripting dialect is parsed into a formal tree via the
//! `ScriptParser` capability; a single-pass visitor collects declarations,
//! SQL string literals, and the condition chains enclosing them. When no
//! tree is available the lexical fallback recovers what simple
//! keyword-adjacent patterns can.

mod extractor;
mod fallback;
mod parser;
mod types;

pub use extractor::SyntaxTreeExtractor;
pub use fallback::LexicalFallback;
pub use parser::{ParseFailure, PhpTreeParser, ScriptParser};
pub use types::{AstExtraction, ClassRecord, FunctionRecord};

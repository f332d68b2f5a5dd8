//! Scanner module - enumerates analyzable source files under a project root
//!
//! Walks the filesystem, skips vendored and VCS directories, and tags every
//! file with the source dialect its extension implies.

mod types;
mod walker;

pub use types::{Dialect, ScanConfig, ScanResult, SourceFile};
pub use walker::Scanner;

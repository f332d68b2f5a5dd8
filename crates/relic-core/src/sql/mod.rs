//! SQL module - query normalization and table-name derivation

mod normalizer;

pub use normalizer::{NormalizedQuery, SqlNormalizer};

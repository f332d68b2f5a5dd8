//! Symbol table - superglobal and injected-constant registry
//!
//! Runtime-injected and environment-sourced values are modeled as an
//! explicit enumerated mapping with {kind, origin} metadata, extended only
//! through registration. Consulted by the include resolver when a directive
//! argument references a named constant.

use std::collections::HashMap;
use std::sync::RwLock;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Superglobal,
    Constant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolOrigin {
    Builtin,
    Injected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub kind: SymbolKind,
    pub origin: SymbolOrigin,
    /// Resolved string value; empty for superglobals, which have no static value
    pub value: String,
}

/// Well-known ambient names of the primary scripting dialect.
const SUPERGLOBALS: &[&str] = &[
    "$_GET", "$_POST", "$_REQUEST", "$_SESSION", "$_COOKIE", "$_SERVER", "$_FILES", "$_ENV",
    "$GLOBALS",
];

/// Registry of symbolic names visible to the extractors
pub struct SymbolTable {
    inner: RwLock<FxHashMap<String, SymbolInfo>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        for name in SUPERGLOBALS {
            map.insert(
                name.to_string(),
                SymbolInfo {
                    kind: SymbolKind::Superglobal,
                    origin: SymbolOrigin::Builtin,
                    value: String::new(),
                },
            );
        }
        Self {
            inner: RwLock::new(map),
        }
    }

    /// Merge name→value pairs as injected constants.
    pub fn inject(&self, values: &HashMap<String, String>) {
        if let Ok(mut map) = self.inner.write() {
            for (name, value) in values {
                map.insert(
                    name.clone(),
                    SymbolInfo {
                        kind: SymbolKind::Constant,
                        origin: SymbolOrigin::Injected,
                        value: value.clone(),
                    },
                );
            }
        }
    }

    /// Value of a registered constant; superglobals have none.
    pub fn constant_value(&self, name: &str) -> Option<String> {
        let map = self.inner.read().ok()?;
        map.get(name)
            .filter(|info| info.kind == SymbolKind::Constant)
            .map(|info| info.value.clone())
    }

    pub fn get(&self, name: &str) -> Option<SymbolInfo> {
        self.inner.read().ok()?.get(name).cloned()
    }

    /// Drops injected entries, keeping the builtin seed.
    pub fn clear_injected(&self) {
        if let Ok(mut map) = self.inner.write() {
            map.retain(|_, info| info.origin == SymbolOrigin::Builtin);
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

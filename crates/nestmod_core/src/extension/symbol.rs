//! Exported-symbol discovery for the dynamic load path.
//!
//! # Responsibility
//! - Map a library name to its well-known `<library>_mod` symbol.
//! - Resolve that symbol to the module's singleton descriptor.
//!
//! # Invariants
//! - Library names are plain identifiers; anything else is rejected before lookup.

use crate::extension::module::ExtensionModule;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// Suffix appended to a library name to form its activation symbol.
pub const MODULE_SYMBOL_SUFFIX: &str = "_mod";

static LIBRARY_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("library name pattern is valid")
});

/// Returns whether `library` can be turned into an exported symbol name.
pub fn is_valid_library_name(library: &str) -> bool {
    LIBRARY_NAME.is_match(library)
}

/// Builds the activation symbol name for `library`.
pub fn module_symbol(library: &str) -> String {
    format!("{library}{MODULE_SYMBOL_SUFFIX}")
}

/// Source of exported module descriptors.
pub trait SymbolResolver {
    fn resolve(&self, symbol: &str) -> Option<&'static dyn ExtensionModule>;
}

/// In-process export table.
///
/// Stands in for the platform loader when the module is already in the
/// address space.
#[derive(Default)]
pub struct SymbolTable {
    symbols: BTreeMap<String, &'static dyn ExtensionModule>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exports `module` under `symbol`, replacing any previous export.
    pub fn export(&mut self, symbol: impl Into<String>, module: &'static dyn ExtensionModule) {
        self.symbols.insert(symbol.into(), module);
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.symbols.keys().map(String::as_str).collect()
    }
}

impl SymbolResolver for SymbolTable {
    fn resolve(&self, symbol: &str) -> Option<&'static dyn ExtensionModule> {
        self.symbols.get(symbol).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{is_valid_library_name, module_symbol};

    #[test]
    fn builds_symbol_from_library_name() {
        assert_eq!(module_symbol("cerebmodule"), "cerebmodule_mod");
    }

    #[test]
    fn validates_library_names() {
        assert!(is_valid_library_name("cerebmodule"));
        assert!(is_valid_library_name("_private2"));
        assert!(!is_valid_library_name(""));
        assert!(!is_valid_library_name("2fast"));
        assert!(!is_valid_library_name("cereb-module"));
        assert!(!is_valid_library_name("cereb module"));
    }
}

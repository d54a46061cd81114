//! Symbol catalog - the card faces a board draws from
//!
//! A board with more pairs than the catalog has symbols wraps around
//! (`slot % len`), so the same symbol can appear on two different pairs.

use crate::error::CatalogError;
use crate::types::Symbol;

/// Card faces shipped by default
pub const DEFAULT_SYMBOLS: [&str; 6] = ["apple", "banana", "grapes", "hippo", "lion", "monkey"];

/// Ordered, non-empty list of symbol labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCatalog {
    labels: Vec<String>,
}

impl SymbolCatalog {
    /// Build a catalog from labels
    ///
    /// Fails with [`CatalogError::Empty`] when no labels are given.
    pub fn new<I, S>(labels: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { labels })
    }

    /// Catalog of `size` anonymous symbols named `symbol-0`, `symbol-1`, ...
    pub fn numbered(size: usize) -> Result<Self, CatalogError> {
        Self::new((0..size).map(|i| format!("symbol-{i}")))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of a symbol, if it belongs to this catalog
    pub fn label(&self, symbol: Symbol) -> Option<&str> {
        self.labels.get(symbol as usize).map(String::as_str)
    }

    /// Symbol assigned to the `slot`-th pair, wrapping around the catalog
    pub fn symbol_for_slot(&self, slot: usize) -> Symbol {
        (slot % self.labels.len()) as Symbol
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self {
            labels: DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog_rejected() {
        let labels: Vec<String> = Vec::new();
        assert_eq!(SymbolCatalog::new(labels), Err(CatalogError::Empty));
        assert_eq!(SymbolCatalog::numbered(0), Err(CatalogError::Empty));
    }

    #[test]
    fn test_default_catalog() {
        let catalog = SymbolCatalog::default();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.label(0), Some("apple"));
        assert_eq!(catalog.label(5), Some("monkey"));
        assert_eq!(catalog.label(6), None);
    }

    #[test]
    fn test_symbol_for_slot_wraps() {
        let catalog = SymbolCatalog::numbered(4).unwrap();
        assert_eq!(catalog.symbol_for_slot(0), 0);
        assert_eq!(catalog.symbol_for_slot(3), 3);
        assert_eq!(catalog.symbol_for_slot(4), 0);
        assert_eq!(catalog.symbol_for_slot(9), 1);
    }
}

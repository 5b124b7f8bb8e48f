//! Catalog over part types submitted at link time
//!
//! Part types are collected through the `PART_TYPES` distributed slice, the
//! same way the composition root finds everything it can wire without an
//! explicit list.

use std::sync::Arc;

use partwire_application::{PART_TYPES, PartTypeEntry};
use partwire_domain::{ComposablePartCatalog, ComposablePartDefinition};
use tracing::debug;

/// Catalog of every discovered part type, ordered by part name
#[derive(Clone)]
pub struct DiscoveredCatalog {
    names: Vec<&'static str>,
    parts: Vec<Arc<dyn ComposablePartDefinition>>,
}

impl DiscoveredCatalog {
    /// Every submitted part type
    pub fn new() -> Self {
        Self::filtered(|_| true)
    }

    /// Submitted part types whose name satisfies `include`
    pub fn filtered<F: Fn(&str) -> bool>(include: F) -> Self {
        let mut entries: Vec<&PartTypeEntry> = PART_TYPES
            .iter()
            .filter(|entry| include(entry.name))
            .collect();
        // Link order is unspecified
        entries.sort_by_key(|entry| entry.name);

        let names: Vec<&'static str> = entries.iter().map(|entry| entry.name).collect();
        let parts: Vec<Arc<dyn ComposablePartDefinition>> =
            entries.iter().map(|entry| (entry.definition)()).collect();
        debug!(parts = ?names, "discovered part types");
        Self { names, parts }
    }

    /// Names of the discovered part types, in catalog order
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }
}

impl Default for DiscoveredCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ComposablePartCatalog for DiscoveredCatalog {
    fn parts(&self) -> Vec<Arc<dyn ComposablePartDefinition>> {
        self.parts.clone()
    }
}

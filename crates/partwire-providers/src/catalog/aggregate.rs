//! Union of catalogs

use std::sync::Arc;

use partwire_domain::{ComposablePartCatalog, ComposablePartDefinition};

/// Parts of every inner catalog, catalog by catalog
#[derive(Clone, Default)]
pub struct AggregateCatalog {
    catalogs: Vec<Arc<dyn ComposablePartCatalog>>,
}

impl AggregateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a catalog
    pub fn with_catalog(mut self, catalog: Arc<dyn ComposablePartCatalog>) -> Self {
        self.catalogs.push(catalog);
        self
    }

    pub fn catalog_count(&self) -> usize {
        self.catalogs.len()
    }
}

impl ComposablePartCatalog for AggregateCatalog {
    fn parts(&self) -> Vec<Arc<dyn ComposablePartDefinition>> {
        self.catalogs
            .iter()
            .flat_map(|catalog| catalog.parts())
            .collect()
    }
}

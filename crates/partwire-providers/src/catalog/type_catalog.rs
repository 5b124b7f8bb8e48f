//! Catalog over an explicit list of parts

use std::sync::Arc;

use partwire_application::ComposablePartType;
use partwire_domain::{ComposablePartCatalog, ComposablePartDefinition};

/// Catalog holding the part definitions it was given, in order
#[derive(Clone, Default)]
pub struct TypeCatalog {
    parts: Vec<Arc<dyn ComposablePartDefinition>>,
}

impl TypeCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the part described by the Rust type `T`
    pub fn with_part<T: ComposablePartType>(mut self) -> Self {
        self.parts.push(T::part_definition());
        self
    }

    /// Add an already built part definition
    pub fn with_definition(mut self, definition: Arc<dyn ComposablePartDefinition>) -> Self {
        self.parts.push(definition);
        self
    }

    /// Number of parts
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the catalog has no parts
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl FromIterator<Arc<dyn ComposablePartDefinition>> for TypeCatalog {
    fn from_iter<I: IntoIterator<Item = Arc<dyn ComposablePartDefinition>>>(iter: I) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}

impl ComposablePartCatalog for TypeCatalog {
    fn parts(&self) -> Vec<Arc<dyn ComposablePartDefinition>> {
        self.parts.clone()
    }
}

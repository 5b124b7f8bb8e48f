//! Composition root
//!
//! Builds a ready container from configuration: every configured catalog
//! (plus the discovered part types, unless disabled) is registered through
//! the bridge, the metadata sources are installed, and the caller gets a
//! last chance to add its own registrations before the container is frozen.

use std::sync::Arc;

use partwire_application::{
    DefaultExposedServicesMapper, ExposedServicesMapper, NoExposedServices, register_catalog_with,
    register_metadata_sources,
};
use partwire_domain::{ComposablePartCatalog, Result};
use partwire_providers::{AggregateCatalog, Container, ContainerBuilder, DiscoveredCatalog};
use tracing::info;

use crate::config::{CompositionConfig, ExposedServicesMode};

/// Builds a [`Container`] from catalogs according to a [`CompositionConfig`]
pub struct CompositionBootstrap {
    config: CompositionConfig,
    catalogs: Vec<Arc<dyn ComposablePartCatalog>>,
}

impl CompositionBootstrap {
    /// Bootstrap with no explicit catalogs
    pub fn new(config: CompositionConfig) -> Self {
        Self {
            config,
            catalogs: Vec::new(),
        }
    }

    /// Add a catalog; catalogs are registered in the order they are added
    pub fn with_catalog(mut self, catalog: Arc<dyn ComposablePartCatalog>) -> Self {
        self.catalogs.push(catalog);
        self
    }

    /// Configuration in use
    pub fn config(&self) -> &CompositionConfig {
        &self.config
    }

    /// Build the container
    pub fn build(self) -> Result<Container> {
        self.build_with(|_| Ok(()))
    }

    /// Build the container, letting `configure` add registrations first
    pub fn build_with<F>(self, configure: F) -> Result<Container>
    where
        F: FnOnce(&mut ContainerBuilder) -> Result<()>,
    {
        let mut builder = ContainerBuilder::new();
        let catalog = self.catalog();
        let parts = catalog.parts().len();
        register_catalog_with(&mut builder, Arc::new(catalog), self.mapper().as_ref())?;
        if self.config.metadata_sources {
            register_metadata_sources(&mut builder);
        }
        configure(&mut builder)?;

        info!(
            parts,
            registrations = builder.registration_count(),
            exposed_services = ?self.config.exposed_services,
            metadata_sources = self.config.metadata_sources,
            "Composition container ready"
        );
        Ok(builder.build())
    }

    fn catalog(&self) -> AggregateCatalog {
        let mut catalog = AggregateCatalog::new();
        if self.config.discover_parts {
            let excluded = &self.config.excluded_parts;
            let discovered =
                DiscoveredCatalog::filtered(|name| !excluded.iter().any(|skip| skip == name));
            catalog = catalog.with_catalog(Arc::new(discovered));
        }
        self.catalogs
            .iter()
            .fold(catalog, |catalog, extra| catalog.with_catalog(Arc::clone(extra)))
    }

    fn mapper(&self) -> Box<dyn ExposedServicesMapper> {
        match self.config.exposed_services {
            ExposedServicesMode::Default => Box::new(DefaultExposedServicesMapper::new()),
            ExposedServicesMode::None => Box::new(NoExposedServices),
        }
    }
}

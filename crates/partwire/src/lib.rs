//! # partwire
//!
//! Hosts catalog parts (types that declare exports and imports under string
//! contract names) inside a typed component container with lifetimes,
//! lifetime scopes and activation hooks.
//!
//! This crate is the public facade: it re-exports every layer and offers a
//! [`prelude`] with the names a composition root usually needs.
//!
//! ## Example
//!
//! ```ignore
//! use partwire::prelude::*;
//!
//! struct Clock;
//!
//! impl PartType for Clock {
//!     fn describe(part: PartDescriptor<Self>) -> PartDescriptor<Self> {
//!         part.export(ExportSpec::this())
//!     }
//!
//!     fn construct(_imports: &ImportedValues) -> Result<Self> {
//!         Ok(Clock)
//!     }
//! }
//!
//! let mut builder = ContainerBuilder::new();
//! register_catalog(&mut builder, Arc::new(TypeCatalog::new().with_part::<Clock>()))?;
//! let container = builder.build();
//! let clock = resolve_exports_for::<Clock>(&container)?[0].value_as::<Clock>()?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Contract identities, metadata, catalog and registry ports
//! - `application` - The catalog-to-registry bridge
//! - `providers` - Component container and catalogs
//! - `infrastructure` - Configuration, logging and the composition root

/// Domain layer - contract identities, metadata and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use partwire_domain::*;
}

/// Application layer - the catalog-to-registry bridge
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use partwire_application::*;
}

/// Providers - component container, lifetime scopes and catalogs
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use partwire_providers::*;
}

/// Infrastructure layer - configuration, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use partwire_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the container and composition root at the crate root
pub use infrastructure::{AppConfig, CompositionBootstrap, ConfigLoader};
pub use providers::{Container, ContainerBuilder, LifetimeScope};

/// Names needed to declare parts and compose a container
pub mod prelude {
    pub use std::sync::Arc;

    pub use partwire_application::{
        ComposablePartType, ExportRegistrationExt, ExportSpec, ImportSpec, ImportedValues, Meta,
        LazyWithMetadata, PART_TYPES, PartDescriptor, PartType, PartTypeEntry, definition_of,
        register_catalog, register_catalog_with, register_metadata_sources, register_part_type,
        resolve_all_lazy, resolve_all_meta, resolve_exports, resolve_exports_for,
        resolve_exports_named, resolve_lazy, resolve_meta,
    };
    pub use partwire_domain::{
        ComponentContext, ComponentContextExt, ComponentRegistry, ComposablePartCatalog,
        ContractName, ContractService, CreationPolicy, Error, Export, ImportCardinality, Metadata,
        MetadataView, RegistrationBuilder, Result, Service, instance,
    };
    pub use partwire_infrastructure::{CompositionBootstrap, CompositionConfig};
    pub use partwire_providers::{
        AggregateCatalog, Container, ContainerBuilder, DiscoveredCatalog, LifetimeScope,
        TypeCatalog,
    };
}

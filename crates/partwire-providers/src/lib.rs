//! # partwire - Collaborator Implementations
//!
//! Concrete implementations of the two composition models the bridge
//! connects. Each one implements ports defined in `partwire-domain`.
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Registry | `ComponentRegistry`, `ComponentContext` | `ContainerBuilder`, `Container`, `LifetimeScope` |
//! | Catalog | `ComposablePartCatalog` | `TypeCatalog`, `AggregateCatalog`, `DiscoveredCatalog` |
//!
//! ## Usage
//!
//! ```ignore
//! use partwire_providers::catalog::TypeCatalog;
//! use partwire_providers::container::ContainerBuilder;
//! ```

// Re-export partwire-domain types commonly used with providers
pub use partwire_domain::error::{Error, Result};
pub use partwire_domain::ports::{ComponentContext, ComponentRegistry, ComposablePartCatalog};

/// In-memory component container
///
/// Implements the registry ports: registration, lifetime scopes,
/// single-instance sharing, activation hooks and release tracking.
pub mod container;

/// Part catalog implementations
///
/// Implements `ComposablePartCatalog` over explicit, aggregated and
/// link-time discovered part types.
pub mod catalog;

pub use catalog::{AggregateCatalog, DiscoveredCatalog, TypeCatalog};
pub use container::{Container, ContainerBuilder, LifetimeScope};

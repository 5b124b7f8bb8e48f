//! Application Layer - partwire
//!
//! The bridge between a part catalog (parts with exports and imports named
//! by string contracts) and a component registry (typed and keyed services,
//! lifetimes, activation hooks).
//!
//! ## Architecture
//!
//! The application layer:
//! - Turns part and export definitions into registrations
//! - Maps contract names back to types through the type identity cache
//! - Drives two-phase import satisfaction through activation hooks
//! - Keeps every registration built from one part on one lifetime
//! - Exposes registry components back into contract space
//!
//! It talks to both collaborators only through the ports declared in
//! `partwire-domain`.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`identity`] | Contract Identity Resolver |
//! | [`exposed_services`] | Extra typed/keyed services for exports |
//! | [`lifetime`] | Shared/non-shared classification of a part |
//! | [`part_instance`] | Per-instance import wiring state machine |
//! | [`imports`] | Import Satisfaction Engine |
//! | [`catalog_registration`] | Catalog-to-Registry Adapter |
//! | [`exports`] | Export resolution for callers |
//! | [`export_configuration`] | Export Configuration Builder |
//! | [`metadata_sources`] | Lazy and metadata wrapper sources |
//! | [`attributed`] | Part definitions described by Rust types |
//! | [`registry`] | Link-time part type registry |

pub mod attributed;
pub mod catalog_registration;
pub mod export_configuration;
pub mod exports;
pub mod exposed_services;
pub mod identity;
pub mod imports;
pub mod lifetime;
pub mod metadata_sources;
pub mod part_instance;
pub mod registry;

pub use attributed::{
    ComposablePartType, ExportSpec, ImportSpec, ImportedValues, PartDescriptor, PartType,
    TypedPart, TypedPartDefinition,
};
pub use catalog_registration::{
    register_catalog, register_catalog_with, register_export, register_part,
    register_part_type, register_part_type_with, resolve_catalog,
};
pub use export_configuration::{ExportConfigurationBuilder, ExportRegistrationExt};
pub use exports::{resolve_exports, resolve_exports_for, resolve_exports_named};
pub use exposed_services::{
    DefaultExposedServicesMapper, ExplicitServices, ExposedServicesMapper, NoExposedServices,
};
pub use identity::ContractIdentityResolver;
pub use imports::{import_contract_service, matching_registrations, resolve_import, set_imports};
pub use lifetime::PartSharing;
pub use metadata_sources::{
    LazyInstance, LazyWithMetadata, LazyWithMetadataSource, Meta, MetaInstance,
    StronglyTypedMetadataSource, register_metadata_sources, resolve_all_lazy, resolve_all_meta,
    resolve_lazy, resolve_meta,
};
pub use part_instance::{PartInstance, PartStage};
pub use registry::{PART_TYPES, PartTypeEntry, definition_of, list_part_types};

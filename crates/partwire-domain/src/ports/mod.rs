//! Domain Port Interfaces
//!
//! Boundary contracts for the two composition models the bridge connects.
//!
//! ## Organization
//!
//! - **catalog** - parts, export/import definitions, export handles
//! - **registry** - registrations, registration sources, resolution contexts

/// Catalog model ports
pub mod catalog;
/// Registry model ports
pub mod registry;

pub use catalog::{
    ComposablePart, ComposablePartCatalog, ComposablePartDefinition, ConstraintImportDefinition,
    ContractBasedImportDefinition, Export, ExportDefinition, ImportConstraint,
    ImportDefinition, validate_export_definition,
};
pub use registry::{
    ActivationEvent, ActivationHook, ComponentContext, ComponentContextExt, ComponentFactory,
    ComponentRegistration, ComponentRegistry, Parameter, RegisteredCallback,
    RegistrationAccessor, RegistrationBuilder, RegistrationId, RegistrationSource, ReleaseHook,
    SharedContext,
};

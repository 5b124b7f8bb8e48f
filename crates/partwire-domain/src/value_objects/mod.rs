//! Domain Value Objects
//!
//! Immutable value objects shared by the catalog model, the registry model
//! and the bridge between them.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`TypeKey`] | Concrete type descriptor |
//! | [`ContractName`] | Catalog contract identity |
//! | [`ContractService`] | Contract name plus type identity, as a registry service |
//! | [`Metadata`] | Insertion-ordered typed metadata map |
//! | [`Service`] | Anything a registration answers to |
//! | [`InstanceLifetime`] | New-per-resolution vs single instance |
//! | [`ImportCardinality`] | Expected match count of an import |

/// Contract names and contract services
pub mod contract;
/// Type-erased instances
pub mod instance;
/// Typed metadata maps
pub mod metadata;
/// Lifetime, ownership, creation policy and cardinality
pub mod policy;
/// Registry service identities
pub mod service;
/// Runtime type descriptors
pub mod type_key;

pub use contract::{ContractName, ContractService};
pub use instance::{Instance, InstanceFactory, LazyValue, downcast_instance, instance};
pub use metadata::{Metadata, MetadataValue, MetadataView};
pub use policy::{CreationPolicy, ImportCardinality, InstanceLifetime, InstanceOwnership};
pub use service::{Service, ServiceMarker};
pub use type_key::TypeKey;

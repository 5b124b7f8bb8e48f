//! Part definitions described by Rust types
//!
//! A [`PartType`] declares its exports, imports and metadata through a
//! [`PartDescriptor`] and is constructed from its prerequisite imports.
//! Imports that are not prerequisites are delivered after construction
//! through setters taking `&Self`, so such fields need interior mutability.
//!
//! ```ignore
//! struct Reporter {
//!     clock: Arc<Clock>,
//!     sinks: OnceLock<Vec<Arc<Sink>>>,
//! }
//!
//! impl PartType for Reporter {
//!     fn describe(part: PartDescriptor<Self>) -> PartDescriptor<Self> {
//!         part.export(ExportSpec::this())
//!             .import(ImportSpec::of::<Clock>("clock"))
//!             .import(ImportSpec::of::<Sink>("sinks").zero_or_more().after_construction(
//!                 |reporter: &Reporter, sinks| {
//!                     let _ = reporter.sinks.set(values_of(sinks)?);
//!                     Ok(())
//!                 },
//!             ))
//!     }
//!
//!     fn construct(imports: &ImportedValues) -> Result<Self> {
//!         Ok(Self { clock: imports.one("clock")?, sinks: OnceLock::new() })
//!     }
//! }
//! ```

mod descriptor;
mod part;

pub use descriptor::{ExportSpec, ImportSpec, ImportedValues, PartDescriptor};
pub use part::{TypedPart, TypedPartDefinition};

use std::sync::Arc;

use partwire_domain::{ComposablePartDefinition, Result};

/// A Rust type that is a catalog part
pub trait PartType: Sized + Send + Sync + 'static {
    /// Declare exports, imports and metadata
    fn describe(part: PartDescriptor<Self>) -> PartDescriptor<Self>;

    /// Build the object once its prerequisite imports are assigned
    fn construct(imports: &ImportedValues) -> Result<Self>;
}

/// Anything that can produce a part definition from its type alone
pub trait ComposablePartType {
    /// Part definition describing `Self`
    fn part_definition() -> Arc<dyn ComposablePartDefinition>;
}

impl<T: PartType> ComposablePartType for T {
    fn part_definition() -> Arc<dyn ComposablePartDefinition> {
        Arc::new(TypedPartDefinition::<T>::new())
    }
}

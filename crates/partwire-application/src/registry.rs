//! Part Type Registry
//!
//! Auto-registration system for part types using linkme distributed slices.
//! Part types submit themselves via `#[linkme::distributed_slice(PART_TYPES)]`
//! and are discovered at runtime by the discovered catalog.

use std::sync::Arc;

use partwire_domain::ComposablePartDefinition;

use crate::attributed::ComposablePartType;

/// Registry entry for a part type
///
/// Each part type registers itself with this entry using
/// `#[linkme::distributed_slice(PART_TYPES)]`.
///
/// ```ignore
/// #[linkme::distributed_slice(PART_TYPES)]
/// static REPORTER_PART: PartTypeEntry = PartTypeEntry {
///     name: "reporter",
///     definition: definition_of::<Reporter>,
/// };
/// ```
pub struct PartTypeEntry {
    /// Unique part name
    pub name: &'static str,
    /// Builds the part definition
    pub definition: fn() -> Arc<dyn ComposablePartDefinition>,
}

// Auto-collection via linkme distributed slices - part types submit entries at compile time
#[linkme::distributed_slice]
pub static PART_TYPES: [PartTypeEntry] = [..];

/// Part definition of `T`, usable as a [`PartTypeEntry::definition`]
pub fn definition_of<T: ComposablePartType>() -> Arc<dyn ComposablePartDefinition> {
    T::part_definition()
}

/// Names of every registered part type
pub fn list_part_types() -> Vec<&'static str> {
    PART_TYPES.iter().map(|entry| entry.name).collect()
}

//! Lifetime Synchronizer
//!
//! Every registration built from one part (the hidden part registration,
//! each export registration and each exposed-services registration) carries
//! the same lifetime. The classification is computed once, at registration
//! time, from the part's creation policy and never revisited.

use partwire_domain::constants::PART_CREATION_POLICY_METADATA_KEY;
use partwire_domain::{
    ComposablePartDefinition, CreationPolicy, InstanceLifetime, Metadata, RegistrationBuilder,
};

/// Sharing classification of a part
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartSharing {
    /// One part instance backs every export
    Shared,
    /// A new part instance per resolution
    NonShared,
}

impl PartSharing {
    /// Classify a part definition
    pub fn of(definition: &dyn ComposablePartDefinition) -> Self {
        Self::from_metadata(definition.metadata())
    }

    /// Classify part metadata; shared unless the policy is explicitly non-shared
    pub fn from_metadata(metadata: &Metadata) -> Self {
        match metadata.get_as::<CreationPolicy>(PART_CREATION_POLICY_METADATA_KEY) {
            Some(CreationPolicy::NonShared) => Self::NonShared,
            _ => Self::Shared,
        }
    }

    /// Registry lifetime for this classification
    pub fn lifetime(self) -> InstanceLifetime {
        match self {
            Self::Shared => InstanceLifetime::SingleInstance,
            Self::NonShared => InstanceLifetime::PerDependency,
        }
    }

    /// Stamp the lifetime onto a registration derived from the part
    pub fn apply(self, registration: RegistrationBuilder) -> RegistrationBuilder {
        registration.with_lifetime(self.lifetime())
    }
}

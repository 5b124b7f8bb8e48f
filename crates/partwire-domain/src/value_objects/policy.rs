//! Lifetime, ownership, creation policy and cardinality

/// How many instances a registration produces
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InstanceLifetime {
    /// A new instance for every resolution
    #[default]
    PerDependency,
    /// One instance per container, constructed at most once
    SingleInstance,
}

/// Who is responsible for releasing a produced instance
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InstanceOwnership {
    /// The lifetime scope tracks and releases the instance
    #[default]
    OwnedByScope,
    /// The registry never takes release responsibility
    ExternallyOwned,
}

/// Catalog-side sharing policy of a part
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CreationPolicy {
    /// No explicit policy (treated as shared)
    #[default]
    Any,
    /// One part instance backs every export
    Shared,
    /// A new part instance per request
    NonShared,
}

/// Expected number of matches for an import
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ImportCardinality {
    /// Exactly one export is expected; zero is a hard failure
    #[default]
    ExactlyOne,
    /// At most one export is expected; zero is allowed
    ZeroOrOne,
    /// Any number of exports
    ZeroOrMore,
}

impl ImportCardinality {
    /// Whether zero candidates is an error
    pub fn is_required(self) -> bool {
        matches!(self, Self::ExactlyOne)
    }
}

impl From<CreationPolicy> for crate::value_objects::MetadataValue {
    fn from(value: CreationPolicy) -> Self {
        Self::new(value)
    }
}

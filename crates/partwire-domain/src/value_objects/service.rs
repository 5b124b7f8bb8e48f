//! Registry service identities

use std::fmt;

use uuid::Uuid;

use crate::value_objects::{ContractService, TypeKey};

/// Private unique service key
///
/// Only the code that created a marker can build the matching [`Service`],
/// which keeps hidden registrations out of ordinary lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ServiceMarker(Uuid);

impl ServiceMarker {
    /// Fresh random marker
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ServiceMarker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ServiceMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker {}", self.0)
    }
}

/// Something a registration answers to
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Service {
    /// Lookup by Rust type
    Typed(TypeKey),
    /// Lookup by Rust type and string key
    Keyed {
        /// Service key
        key: String,
        /// Type of the resolved value
        service_type: TypeKey,
    },
    /// Lookup by catalog contract
    Contract(ContractService),
    /// Lookup by private marker
    Marker(ServiceMarker),
    /// Lazy value plus metadata wrapper around another service
    Lazy(Box<Service>),
    /// Eager value plus metadata wrapper around another service
    Meta(Box<Service>),
}

impl Service {
    /// Typed service for `T`
    pub fn typed<T: ?Sized + 'static>() -> Self {
        Self::Typed(TypeKey::of::<T>())
    }

    /// Keyed service for `T`
    pub fn keyed<T: ?Sized + 'static, K: Into<String>>(key: K) -> Self {
        Self::Keyed {
            key: key.into(),
            service_type: TypeKey::of::<T>(),
        }
    }

    /// Lazy-with-metadata wrapper around `inner`
    pub fn lazy(inner: Service) -> Self {
        Self::Lazy(Box::new(inner))
    }

    /// Metadata wrapper around `inner`
    pub fn meta(inner: Service) -> Self {
        Self::Meta(Box::new(inner))
    }

    /// Wrapped service, for wrapper variants
    pub fn inner(&self) -> Option<&Service> {
        match self {
            Self::Lazy(inner) | Self::Meta(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<ContractService> for Service {
    fn from(value: ContractService) -> Self {
        Self::Contract(value)
    }
}

impl From<ServiceMarker> for Service {
    fn from(value: ServiceMarker) -> Self {
        Self::Marker(value)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typed(service_type) => write!(f, "{service_type}"),
            Self::Keyed { key, service_type } => write!(f, "({key}) {service_type}"),
            Self::Contract(contract) => write!(f, "{contract}"),
            Self::Marker(marker) => write!(f, "{marker}"),
            Self::Lazy(inner) => write!(f, "Lazy<{inner}>"),
            Self::Meta(inner) => write!(f, "Meta<{inner}>"),
        }
    }
}

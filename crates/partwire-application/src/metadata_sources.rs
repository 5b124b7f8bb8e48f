//! Metadata registration sources
//!
//! Two standing strategies that answer wrapper services on demand, without
//! the wrappers being declared up front:
//!
//! - [`LazyWithMetadataSource`] answers `Service::Lazy(inner)` with one
//!   [`LazyInstance`] per registration of `inner`: the registration's
//!   metadata plus a value resolved on first access.
//! - [`StronglyTypedMetadataSource`] answers `Service::Meta(inner)` with one
//!   [`MetaInstance`] per registration of `inner`: the registration's
//!   metadata plus the resolved value.
//!
//! The typed helpers turn those erased wrappers into [`LazyWithMetadata`]
//! and [`Meta`], viewing the metadata through a [`MetadataView`].

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use partwire_domain::{
    ComponentContext, ComponentRegistration, ComponentRegistry, Instance, LazyValue, Metadata,
    MetadataView, RegistrationAccessor, RegistrationBuilder, RegistrationSource, Result, Service,
    downcast_instance, instance,
};
use tracing::debug;

/// Registration metadata plus a value resolved on first access
#[derive(Clone)]
pub struct LazyInstance {
    metadata: Metadata,
    value: LazyValue,
}

impl LazyInstance {
    /// Wrap a value factory
    pub fn new<F>(metadata: Metadata, factory: F) -> Self
    where
        F: Fn() -> Result<Instance> + Send + Sync + 'static,
    {
        Self {
            metadata,
            value: LazyValue::new(factory),
        }
    }

    /// Metadata of the registration behind the value
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The value, resolving it on first access
    pub fn value(&self) -> Result<Instance> {
        self.value.get()
    }

    /// Whether the value has been resolved
    pub fn is_value_created(&self) -> bool {
        self.value.is_created()
    }
}

impl fmt::Debug for LazyInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyInstance")
            .field("metadata", &self.metadata)
            .field("value_created", &self.is_value_created())
            .finish()
    }
}

/// Registration metadata plus the resolved value
#[derive(Clone)]
pub struct MetaInstance {
    metadata: Metadata,
    value: Instance,
}

impl MetaInstance {
    /// Metadata of the registration behind the value
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The resolved value
    pub fn value(&self) -> &Instance {
        &self.value
    }
}

impl fmt::Debug for MetaInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaInstance")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Answers `Service::Lazy(inner)`
#[derive(Clone, Copy, Debug, Default)]
pub struct LazyWithMetadataSource;

impl RegistrationSource for LazyWithMetadataSource {
    fn registrations_for(
        &self,
        service: &Service,
        registrations: RegistrationAccessor<'_>,
    ) -> Vec<ComponentRegistration> {
        let Service::Lazy(inner) = service else {
            return Vec::new();
        };
        registrations(inner)
            .into_iter()
            .map(|target| {
                let metadata = target.metadata().clone();
                let wrapper_metadata = metadata.clone();
                RegistrationBuilder::from_factory(move |context, _| {
                    let scope = context.scope();
                    let target = Arc::clone(&target);
                    Ok(instance(LazyInstance::new(metadata.clone(), move || {
                        scope.resolve_registration(&target, &[])
                    })))
                })
                .as_service(service.clone())
                .externally_owned()
                .with_metadata_map(&wrapper_metadata)
                .build()
                .0
            })
            .collect()
    }
}

/// Answers `Service::Meta(inner)`
#[derive(Clone, Copy, Debug, Default)]
pub struct StronglyTypedMetadataSource;

impl RegistrationSource for StronglyTypedMetadataSource {
    fn registrations_for(
        &self,
        service: &Service,
        registrations: RegistrationAccessor<'_>,
    ) -> Vec<ComponentRegistration> {
        let Service::Meta(inner) = service else {
            return Vec::new();
        };
        registrations(inner)
            .into_iter()
            .map(|target| {
                let metadata = target.metadata().clone();
                let wrapper_metadata = metadata.clone();
                RegistrationBuilder::from_factory(move |context, _| {
                    let value = context.resolve_registration(&target, &[])?;
                    Ok(instance(MetaInstance {
                        metadata: metadata.clone(),
                        value,
                    }))
                })
                .as_service(service.clone())
                .externally_owned()
                .with_metadata_map(&wrapper_metadata)
                .build()
                .0
            })
            .collect()
    }
}

/// Install both metadata sources
pub fn register_metadata_sources(registry: &mut dyn ComponentRegistry) {
    registry.register_source(Arc::new(LazyWithMetadataSource));
    registry.register_source(Arc::new(StronglyTypedMetadataSource));
    debug!("registered metadata sources");
}

/// Lazily resolved `T` with a typed view of its registration metadata
pub struct LazyWithMetadata<T, M> {
    metadata: M,
    inner: LazyInstance,
    _value: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync, M: MetadataView> LazyWithMetadata<T, M> {
    fn from_instance(instance: Instance) -> Result<Self> {
        let inner = LazyInstance::clone(&*downcast_instance::<LazyInstance>(instance)?);
        Ok(Self {
            metadata: M::from_metadata(inner.metadata())?,
            inner,
            _value: PhantomData,
        })
    }

    /// Typed metadata view
    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    /// The value, resolving it on first access
    pub fn value(&self) -> Result<Arc<T>> {
        downcast_instance::<T>(self.inner.value()?)
    }

    /// Whether the value has been resolved
    pub fn is_value_created(&self) -> bool {
        self.inner.is_value_created()
    }
}

/// Resolved `T` with a typed view of its registration metadata
pub struct Meta<T, M> {
    value: Arc<T>,
    metadata: M,
}

impl<T: Any + Send + Sync, M: MetadataView> Meta<T, M> {
    fn from_instance(instance: Instance) -> Result<Self> {
        let inner = downcast_instance::<MetaInstance>(instance)?;
        Ok(Self {
            value: downcast_instance::<T>(Arc::clone(inner.value()))?,
            metadata: M::from_metadata(inner.metadata())?,
        })
    }

    /// The resolved value
    pub fn value(&self) -> &Arc<T> {
        &self.value
    }

    /// Typed metadata view
    pub fn metadata(&self) -> &M {
        &self.metadata
    }
}

/// Lazy wrapper around the last registration of `service`
pub fn resolve_lazy<T, M>(
    context: &dyn ComponentContext,
    service: &Service,
) -> Result<LazyWithMetadata<T, M>>
where
    T: Any + Send + Sync,
    M: MetadataView,
{
    LazyWithMetadata::from_instance(context.resolve_service(&Service::lazy(service.clone()))?)
}

/// Lazy wrappers around every registration of `service`
pub fn resolve_all_lazy<T, M>(
    context: &dyn ComponentContext,
    service: &Service,
) -> Result<Vec<LazyWithMetadata<T, M>>>
where
    T: Any + Send + Sync,
    M: MetadataView,
{
    context
        .resolve_all(&Service::lazy(service.clone()))?
        .into_iter()
        .map(LazyWithMetadata::from_instance)
        .collect()
}

/// Metadata wrapper around the last registration of `service`
pub fn resolve_meta<T, M>(context: &dyn ComponentContext, service: &Service) -> Result<Meta<T, M>>
where
    T: Any + Send + Sync,
    M: MetadataView,
{
    Meta::from_instance(context.resolve_service(&Service::meta(service.clone()))?)
}

/// Metadata wrappers around every registration of `service`
pub fn resolve_all_meta<T, M>(
    context: &dyn ComponentContext,
    service: &Service,
) -> Result<Vec<Meta<T, M>>>
where
    T: Any + Send + Sync,
    M: MetadataView,
{
    context
        .resolve_all(&Service::meta(service.clone()))?
        .into_iter()
        .map(Meta::from_instance)
        .collect()
}

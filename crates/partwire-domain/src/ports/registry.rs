//! Registry ports
//!
//! The registry resolves typed/keyed services against registrations. The
//! bridge needs four things from it: register a factory for a set of services
//! with a lifetime policy, resolve a registration from a context, hook the
//! pre/post activation points, and react when a registration is added.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::value_objects::{
    Instance, InstanceLifetime, InstanceOwnership, Metadata, MetadataValue, Service, TypeKey,
    downcast_instance,
};

/// Identity of a registration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RegistrationId(Uuid);

impl RegistrationId {
    /// Fresh registration id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RegistrationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Extra value supplied to a factory at resolution time
#[derive(Clone)]
pub enum Parameter {
    /// Matched by name
    Named {
        /// Parameter name
        name: String,
        /// Supplied value
        value: Instance,
    },
    /// Matched by type
    Typed {
        /// Type of the supplied value
        value_type: TypeKey,
        /// Supplied value
        value: Instance,
    },
}

impl Parameter {
    /// Named parameter
    pub fn named<T: Any + Send + Sync>(name: impl Into<String>, value: T) -> Self {
        Self::Named {
            name: name.into(),
            value: Arc::new(value),
        }
    }

    /// Typed parameter
    pub fn typed<T: Any + Send + Sync>(value: T) -> Self {
        Self::Typed {
            value_type: TypeKey::of::<T>(),
            value: Arc::new(value),
        }
    }

    /// First named parameter called `name`, as `T`
    pub fn find_named<T: Any + Send + Sync>(parameters: &[Parameter], name: &str) -> Option<Arc<T>> {
        parameters.iter().find_map(|parameter| match parameter {
            Self::Named { name: candidate, value } if candidate == name => {
                downcast_instance::<T>(Arc::clone(value)).ok()
            }
            _ => None,
        })
    }

    /// First typed parameter of type `T`
    pub fn find_typed<T: Any + Send + Sync>(parameters: &[Parameter]) -> Option<Arc<T>> {
        parameters.iter().find_map(|parameter| match parameter {
            Self::Typed { value_type, value } if value_type.is::<T>() => {
                downcast_instance::<T>(Arc::clone(value)).ok()
            }
            _ => None,
        })
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, .. } => f.debug_struct("Named").field("name", name).finish(),
            Self::Typed { value_type, .. } => f
                .debug_struct("Typed")
                .field("value_type", value_type)
                .finish(),
        }
    }
}

/// Builds an instance from a resolution context
pub type ComponentFactory =
    Arc<dyn Fn(&dyn ComponentContext, &[Parameter]) -> Result<Instance> + Send + Sync>;

/// Runs before (activating) or after (activated) an instance is ready
pub type ActivationHook = Arc<dyn Fn(&ActivationEvent<'_>) -> Result<()> + Send + Sync>;

/// Runs when a scope releases an instance it owns
pub type ReleaseHook = Arc<dyn Fn(&Instance) + Send + Sync>;

/// Runs once a registration has been added to a registry
pub type RegisteredCallback = Box<
    dyn FnOnce(&mut dyn ComponentRegistry, &Arc<ComponentRegistration>) -> Result<()> + Send,
>;

/// Arguments of an activation hook
pub struct ActivationEvent<'a> {
    /// Context the instance is being resolved in
    pub context: &'a dyn ComponentContext,
    /// Registration that produced the instance
    pub registration: &'a ComponentRegistration,
    /// The instance under construction
    pub instance: &'a Instance,
}

/// The registry's unit of resolvability
pub struct ComponentRegistration {
    id: RegistrationId,
    services: Vec<Service>,
    factory: ComponentFactory,
    lifetime: InstanceLifetime,
    ownership: InstanceOwnership,
    metadata: Metadata,
    activating: Vec<ActivationHook>,
    activated: Vec<ActivationHook>,
    release: Vec<ReleaseHook>,
}

impl ComponentRegistration {
    /// Registration id
    pub fn id(&self) -> RegistrationId {
        self.id
    }

    /// Services the registration answers to
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Whether the registration answers to `service`
    pub fn exposes(&self, service: &Service) -> bool {
        self.services.contains(service)
    }

    /// Lifetime policy
    pub fn lifetime(&self) -> InstanceLifetime {
        self.lifetime
    }

    /// Ownership policy
    pub fn ownership(&self) -> InstanceOwnership {
        self.ownership
    }

    /// Metadata attached for resolution-time inspection
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Run the factory
    pub fn create(&self, context: &dyn ComponentContext, parameters: &[Parameter]) -> Result<Instance> {
        (self.factory)(context, parameters)
    }

    /// Hooks run before the instance is considered ready
    pub fn activating_hooks(&self) -> &[ActivationHook] {
        &self.activating
    }

    /// Hooks run after the instance is ready
    pub fn activated_hooks(&self) -> &[ActivationHook] {
        &self.activated
    }

    /// Hooks run when an owning scope releases the instance
    pub fn release_hooks(&self) -> &[ReleaseHook] {
        &self.release
    }
}

impl fmt::Debug for ComponentRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRegistration")
            .field("id", &self.id)
            .field("services", &self.services)
            .field("lifetime", &self.lifetime)
            .field("ownership", &self.ownership)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ComponentRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.services.first() {
            Some(service) => write!(f, "{service}"),
            None => write!(f, "registration {}", self.id),
        }
    }
}

/// Fluent description of a registration, consumed by [`ComponentRegistry::register`]
pub struct RegistrationBuilder {
    services: Vec<Service>,
    factory: ComponentFactory,
    lifetime: InstanceLifetime,
    ownership: InstanceOwnership,
    metadata: Metadata,
    activating: Vec<ActivationHook>,
    activated: Vec<ActivationHook>,
    release: Vec<ReleaseHook>,
    registered: Vec<RegisteredCallback>,
}

impl RegistrationBuilder {
    /// Registration built by a factory
    pub fn from_factory<F>(factory: F) -> Self
    where
        F: Fn(&dyn ComponentContext, &[Parameter]) -> Result<Instance> + Send + Sync + 'static,
    {
        Self {
            services: Vec::new(),
            factory: Arc::new(factory),
            lifetime: InstanceLifetime::default(),
            ownership: InstanceOwnership::default(),
            metadata: Metadata::new(),
            activating: Vec::new(),
            activated: Vec::new(),
            release: Vec::new(),
            registered: Vec::new(),
        }
    }

    /// Registration returning an existing value, single instance and externally owned
    pub fn from_instance(instance: Instance) -> Self {
        Self::from_factory(move |_, _| Ok(Arc::clone(&instance)))
            .single_instance()
            .externally_owned()
    }

    /// Answer to `service`
    pub fn as_service(mut self, service: Service) -> Self {
        if !self.services.contains(&service) {
            self.services.push(service);
        }
        self
    }

    /// Answer to every service in `services`
    pub fn as_services<I: IntoIterator<Item = Service>>(mut self, services: I) -> Self {
        for service in services {
            self = self.as_service(service);
        }
        self
    }

    /// Answer to the typed service `T`
    pub fn as_type<T: ?Sized + 'static>(self) -> Self {
        self.as_service(Service::typed::<T>())
    }

    /// Answer to the keyed service `(key, T)`
    pub fn keyed<T: ?Sized + 'static>(self, key: impl Into<String>) -> Self {
        self.as_service(Service::keyed::<T, _>(key))
    }

    /// Set the lifetime policy
    pub fn with_lifetime(mut self, lifetime: InstanceLifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// One instance per container
    pub fn single_instance(self) -> Self {
        self.with_lifetime(InstanceLifetime::SingleInstance)
    }

    /// New instance per resolution
    pub fn instance_per_dependency(self) -> Self {
        self.with_lifetime(InstanceLifetime::PerDependency)
    }

    /// The registry must not release produced values
    pub fn externally_owned(mut self) -> Self {
        self.ownership = InstanceOwnership::ExternallyOwned;
        self
    }

    /// The owning scope releases produced values
    pub fn owned_by_scope(mut self) -> Self {
        self.ownership = InstanceOwnership::OwnedByScope;
        self
    }

    /// Attach one metadata entry
    pub fn with_metadata<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<MetadataValue>,
    {
        self.metadata.insert(key, value);
        self
    }

    /// Attach every entry of `metadata`
    pub fn with_metadata_map(mut self, metadata: &Metadata) -> Self {
        self.metadata.extend_from(metadata);
        self
    }

    /// Run `hook` before the instance is considered ready
    pub fn on_activating<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ActivationEvent<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.activating.push(Arc::new(hook));
        self
    }

    /// Run `hook` after the instance is ready
    pub fn on_activated<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ActivationEvent<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.activated.push(Arc::new(hook));
        self
    }

    /// Run `hook` when an owning scope releases the instance
    pub fn on_release<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Instance) + Send + Sync + 'static,
    {
        self.release.push(Arc::new(hook));
        self
    }

    /// Run `callback` once the registration has been added
    pub fn on_registered<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&mut dyn ComponentRegistry, &Arc<ComponentRegistration>) -> Result<()>
            + Send
            + 'static,
    {
        self.registered.push(Box::new(callback));
        self
    }

    /// Services declared so far
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Lifetime declared so far
    pub fn lifetime(&self) -> InstanceLifetime {
        self.lifetime
    }

    /// Ownership declared so far
    pub fn ownership(&self) -> InstanceOwnership {
        self.ownership
    }

    /// Metadata declared so far
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Split into the registration and its registered-event callbacks
    pub fn build(self) -> (ComponentRegistration, Vec<RegisteredCallback>) {
        let registration = ComponentRegistration {
            id: RegistrationId::new(),
            services: self.services,
            factory: self.factory,
            lifetime: self.lifetime,
            ownership: self.ownership,
            metadata: self.metadata,
            activating: self.activating,
            activated: self.activated,
            release: self.release,
        };
        (registration, self.registered)
    }
}

/// Registration-time side of the registry
pub trait ComponentRegistry {
    /// Add a registration, then run its registered-event callbacks
    fn register(&mut self, registration: RegistrationBuilder) -> Result<Arc<ComponentRegistration>>;

    /// Add a standing strategy that produces registrations on demand
    fn register_source(&mut self, source: Arc<dyn RegistrationSource>);

    /// Whether an explicit registration answers to `service`
    fn is_registered(&self, service: &Service) -> bool;
}

/// Looks up registrations for a service while a source is consulted
pub type RegistrationAccessor<'a> = &'a dyn Fn(&Service) -> Vec<Arc<ComponentRegistration>>;

/// Produces registrations for services that were never registered explicitly
pub trait RegistrationSource: Send + Sync {
    /// Registrations answering `service`, possibly built from `registrations`
    fn registrations_for(
        &self,
        service: &Service,
        registrations: RegistrationAccessor<'_>,
    ) -> Vec<ComponentRegistration>;
}

/// Shareable handle to a lifetime scope
pub type SharedContext = Arc<dyn ComponentContext + Send + Sync>;

/// Resolution-time side of the registry
pub trait ComponentContext {
    /// Registrations answering `service`, in discovery order
    fn registrations_for(&self, service: &Service) -> Vec<Arc<ComponentRegistration>>;

    /// Resolve one registration
    fn resolve_registration(
        &self,
        registration: &Arc<ComponentRegistration>,
        parameters: &[Parameter],
    ) -> Result<Instance>;

    /// Long-lived handle to the lifetime scope behind this context
    fn scope(&self) -> SharedContext;

    /// Whether anything answers to `service`
    fn is_registered(&self, service: &Service) -> bool {
        !self.registrations_for(service).is_empty()
    }

    /// Resolve `service` (the last registration wins)
    fn resolve_service(&self, service: &Service) -> Result<Instance> {
        self.resolve_service_with(service, &[])
    }

    /// Resolve `service` with extra parameters
    fn resolve_service_with(&self, service: &Service, parameters: &[Parameter]) -> Result<Instance> {
        let registrations = self.registrations_for(service);
        let registration = registrations
            .last()
            .ok_or_else(|| Error::component_not_registered(service))?;
        self.resolve_registration(registration, parameters)
    }

    /// Resolve `service` if anything answers to it
    fn resolve_optional(&self, service: &Service) -> Result<Option<Instance>> {
        match self.registrations_for(service).last() {
            Some(registration) => self.resolve_registration(registration, &[]).map(Some),
            None => Ok(None),
        }
    }

    /// Resolve every registration answering `service`
    fn resolve_all(&self, service: &Service) -> Result<Vec<Instance>> {
        self.registrations_for(service)
            .iter()
            .map(|registration| self.resolve_registration(registration, &[]))
            .collect()
    }
}

/// Typed conveniences over [`ComponentContext`]
pub trait ComponentContextExt: ComponentContext {
    /// Resolve the typed service `T`
    fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        downcast_instance::<T>(self.resolve_service(&Service::typed::<T>())?)
    }

    /// Resolve the keyed service `(key, T)`
    fn resolve_keyed<T: Any + Send + Sync>(&self, key: &str) -> Result<Arc<T>> {
        downcast_instance::<T>(self.resolve_service(&Service::keyed::<T, _>(key))?)
    }

    /// Resolve every registration of the typed service `T`
    fn resolve_all_of<T: Any + Send + Sync>(&self) -> Result<Vec<Arc<T>>> {
        self.resolve_all(&Service::typed::<T>())?
            .into_iter()
            .map(downcast_instance::<T>)
            .collect()
    }
}

impl<C: ComponentContext + ?Sized> ComponentContextExt for C {}

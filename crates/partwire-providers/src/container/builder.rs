//! Container builder

use std::any::Any;
use std::sync::Arc;

use partwire_domain::{
    ComponentRegistration, ComponentRegistry, Error, RegistrationBuilder, RegistrationSource,
    Result, Service, instance,
};
use tracing::{debug, info, warn};

use super::scope::Container;
use super::store::ComponentStore;

/// Collects registrations and registration sources
///
/// Registered-event callbacks run right after their registration is added,
/// with the builder available for further registrations. A registration may
/// expose no service when a callback makes it reachable some other way, e.g.
/// through an export. When a callback fails, everything added since the
/// registration is removed again.
#[derive(Default)]
pub struct ContainerBuilder {
    registrations: Vec<Arc<ComponentRegistration>>,
    sources: Vec<Arc<dyn RegistrationSource>>,
}

impl ContainerBuilder {
    /// Empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing value as the typed service `T`
    pub fn register_instance<T: Any + Send + Sync>(
        &mut self,
        value: T,
    ) -> Result<Arc<ComponentRegistration>> {
        self.register(RegistrationBuilder::from_instance(instance(value)).as_type::<T>())
    }

    /// Number of explicit registrations so far
    pub fn registration_count(&self) -> usize {
        self.registrations.len()
    }

    /// Freeze the registrations into a container
    pub fn build(self) -> Container {
        info!(
            registrations = self.registrations.len(),
            sources = self.sources.len(),
            "Building component container"
        );
        Container::new(ComponentStore::new(self.registrations, self.sources))
    }
}

impl ComponentRegistry for ContainerBuilder {
    fn register(&mut self, registration: RegistrationBuilder) -> Result<Arc<ComponentRegistration>> {
        let (registration, callbacks) = registration.build();
        if registration.services().is_empty() && callbacks.is_empty() {
            return Err(Error::invalid_argument(
                "registration does not expose any service",
            ));
        }
        let registration = Arc::new(registration);
        debug!(
            id = %registration.id(),
            services = ?registration.services(),
            lifetime = ?registration.lifetime(),
            "registered component"
        );

        let registrations = self.registrations.len();
        let sources = self.sources.len();
        self.registrations.push(Arc::clone(&registration));

        for callback in callbacks {
            if let Err(error) = callback(self, &registration) {
                warn!(id = %registration.id(), error = %error, "registered callback failed, rolling back");
                self.registrations.truncate(registrations);
                self.sources.truncate(sources);
                return Err(error);
            }
        }
        Ok(registration)
    }

    fn register_source(&mut self, source: Arc<dyn RegistrationSource>) {
        self.sources.push(source);
    }

    fn is_registered(&self, service: &Service) -> bool {
        self.registrations
            .iter()
            .any(|registration| registration.exposes(service))
    }
}

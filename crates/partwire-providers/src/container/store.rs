//! Frozen registration store

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use partwire_domain::{ComponentRegistration, RegistrationSource, Service};
use tracing::trace;

/// Explicit registrations indexed by service, plus registration sources
pub(crate) struct ComponentStore {
    by_service: HashMap<Service, Vec<Arc<ComponentRegistration>>>,
    registration_count: usize,
    sources: Vec<Arc<dyn RegistrationSource>>,
    sourced: DashMap<Service, Vec<Arc<ComponentRegistration>>>,
}

impl ComponentStore {
    pub(crate) fn new(
        registrations: Vec<Arc<ComponentRegistration>>,
        sources: Vec<Arc<dyn RegistrationSource>>,
    ) -> Self {
        let mut by_service: HashMap<Service, Vec<Arc<ComponentRegistration>>> = HashMap::new();
        for registration in &registrations {
            for service in registration.services() {
                by_service
                    .entry(service.clone())
                    .or_default()
                    .push(Arc::clone(registration));
            }
        }
        Self {
            by_service,
            registration_count: registrations.len(),
            sources,
            sourced: DashMap::new(),
        }
    }

    /// Explicit registrations in registration order, then source-produced ones
    pub(crate) fn registrations_for(&self, service: &Service) -> Vec<Arc<ComponentRegistration>> {
        let mut found = self.by_service.get(service).cloned().unwrap_or_default();
        found.extend(self.sourced_for(service));
        found
    }

    pub(crate) fn registration_count(&self) -> usize {
        self.registration_count
    }

    fn sourced_for(&self, service: &Service) -> Vec<Arc<ComponentRegistration>> {
        if self.sources.is_empty() {
            return Vec::new();
        }
        if let Some(cached) = self.sourced.get(service) {
            return cached.value().clone();
        }

        // Sources may look up other services, so nothing is locked while they run
        let accessor = |inner: &Service| self.registrations_for(inner);
        let produced: Vec<Arc<ComponentRegistration>> = self
            .sources
            .iter()
            .flat_map(|source| source.registrations_for(service, &accessor))
            .map(Arc::new)
            .collect();
        trace!(%service, produced = produced.len(), "consulted registration sources");

        self.sourced
            .entry(service.clone())
            .or_insert(produced)
            .value()
            .clone()
    }
}

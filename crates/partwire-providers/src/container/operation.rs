//! One outermost resolution and everything it resolves transitively

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::sync::Arc;

use partwire_domain::{
    ActivationEvent, ComponentContext, ComponentRegistration, Error, Instance, InstanceLifetime,
    Parameter, Result, Service, SharedContext,
};
use tracing::{trace, warn};

use super::scope::LifetimeScope;

struct PendingActivation {
    registration: Arc<ComponentRegistration>,
    instance: Instance,
}

/// Resolution context handed to factories and hooks
///
/// Tracks the registrations under construction to detect cycles, and
/// defers activated hooks until the outermost resolution has produced its
/// value. Instances whose activation fails are never cached.
pub(crate) struct ResolveOperation<'a> {
    scope: &'a LifetimeScope,
    building: RefCell<Vec<Arc<ComponentRegistration>>>,
    pending: RefCell<VecDeque<PendingActivation>>,
    depth: Cell<usize>,
    draining: Cell<bool>,
}

impl<'a> ResolveOperation<'a> {
    pub(crate) fn new(scope: &'a LifetimeScope) -> Self {
        Self {
            scope,
            building: RefCell::new(Vec::new()),
            pending: RefCell::new(VecDeque::new()),
            depth: Cell::new(0),
            draining: Cell::new(false),
        }
    }

    fn execute(
        &self,
        registration: &Arc<ComponentRegistration>,
        parameters: &[Parameter],
    ) -> Result<Instance> {
        if self.scope.is_disposed() {
            return Err(Error::ScopeDisposed);
        }
        if self
            .building
            .borrow()
            .iter()
            .any(|building| building.id() == registration.id())
        {
            return Err(Error::circular_dependency(registration));
        }

        self.building.borrow_mut().push(Arc::clone(registration));
        self.depth.set(self.depth.get() + 1);
        let result = self.lookup_or_create(registration, parameters);
        self.depth.set(self.depth.get() - 1);
        self.building.borrow_mut().pop();

        if self.depth.get() > 0 {
            return result;
        }
        match result {
            Ok(instance) => self.complete().map(|()| instance),
            Err(error) => {
                self.abandon();
                Err(error)
            }
        }
    }

    fn lookup_or_create(
        &self,
        registration: &Arc<ComponentRegistration>,
        parameters: &[Parameter],
    ) -> Result<Instance> {
        match registration.lifetime() {
            InstanceLifetime::SingleInstance => {
                let cell = self.scope.single_instance_cell(registration.id());
                let mut created = false;
                let instance = cell.get_or_try_init(|| {
                    created = true;
                    self.create(registration, parameters)
                })?;
                let instance = Arc::clone(instance);
                if created {
                    self.scope.track(registration, &instance);
                    self.defer_activated(registration, &instance);
                }
                Ok(instance)
            }
            InstanceLifetime::PerDependency => {
                let instance = self.create(registration, parameters)?;
                self.scope.track(registration, &instance);
                self.defer_activated(registration, &instance);
                Ok(instance)
            }
        }
    }

    /// Run the factory, then the activating hooks
    fn create(
        &self,
        registration: &Arc<ComponentRegistration>,
        parameters: &[Parameter],
    ) -> Result<Instance> {
        let instance = registration.create(self, parameters)?;
        let event = ActivationEvent {
            context: self,
            registration: registration.as_ref(),
            instance: &instance,
        };
        for hook in registration.activating_hooks() {
            hook(&event)?;
        }
        trace!(registration = %registration, "created instance");
        Ok(instance)
    }

    fn defer_activated(&self, registration: &Arc<ComponentRegistration>, instance: &Instance) {
        if registration.activated_hooks().is_empty() {
            return;
        }
        self.pending.borrow_mut().push_back(PendingActivation {
            registration: Arc::clone(registration),
            instance: Arc::clone(instance),
        });
    }

    /// Run deferred activated hooks, including those queued while draining
    fn complete(&self) -> Result<()> {
        if self.draining.replace(true) {
            return Ok(());
        }
        let result = self.drain();
        self.draining.set(false);
        result
    }

    fn drain(&self) -> Result<()> {
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(pending) = next else {
                return Ok(());
            };
            let event = ActivationEvent {
                context: self,
                registration: pending.registration.as_ref(),
                instance: &pending.instance,
            };
            for hook in pending.registration.activated_hooks() {
                if let Err(error) = hook(&event) {
                    warn!(registration = %pending.registration, error = %error, "activation failed");
                    self.evict(&pending.registration);
                    self.abandon();
                    return Err(error);
                }
            }
        }
    }

    /// Drop pending activations and forget the single instances they belong to
    fn abandon(&self) {
        let abandoned: Vec<PendingActivation> = self.pending.borrow_mut().drain(..).collect();
        for pending in abandoned {
            self.evict(&pending.registration);
        }
    }

    fn evict(&self, registration: &ComponentRegistration) {
        if registration.lifetime() == InstanceLifetime::SingleInstance {
            self.scope.evict_single_instance(registration.id());
        }
    }
}

impl ComponentContext for ResolveOperation<'_> {
    fn registrations_for(&self, service: &Service) -> Vec<Arc<ComponentRegistration>> {
        self.scope.registrations_for(service)
    }

    fn resolve_registration(
        &self,
        registration: &Arc<ComponentRegistration>,
        parameters: &[Parameter],
    ) -> Result<Instance> {
        self.execute(registration, parameters)
    }

    fn scope(&self) -> SharedContext {
        self.scope.scope()
    }
}

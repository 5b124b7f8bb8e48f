//! Lifetime scopes and the container

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use partwire_domain::{
    ComponentContext, ComponentRegistration, Error, Instance, InstanceLifetime, InstanceOwnership,
    Parameter, RegistrationId, Result, Service, SharedContext,
};
use tracing::debug;

use super::operation::ResolveOperation;
use super::store::ComponentStore;

/// An instance a scope must release on dispose
struct Tracked {
    registration: Arc<ComponentRegistration>,
    instance: Instance,
}

impl Tracked {
    fn release(self) {
        for hook in self.registration.release_hooks() {
            hook(&self.instance);
        }
    }
}

/// State shared by every scope of one container
struct ContainerState {
    store: ComponentStore,
    single_instances: DashMap<RegistrationId, Arc<OnceCell<Instance>>>,
    single_owned: Mutex<Vec<Tracked>>,
    disposed: AtomicBool,
}

struct ScopeInner {
    container: Arc<ContainerState>,
    is_root: bool,
    owned: Mutex<Vec<Tracked>>,
    disposed: AtomicBool,
}

/// A resolution boundary owning the per-dependency instances it creates
///
/// Cloning yields another handle to the same scope.
#[derive(Clone)]
pub struct LifetimeScope {
    inner: Arc<ScopeInner>,
}

impl LifetimeScope {
    fn root(store: ComponentStore) -> Self {
        let container = Arc::new(ContainerState {
            store,
            single_instances: DashMap::new(),
            single_owned: Mutex::new(Vec::new()),
            disposed: AtomicBool::new(false),
        });
        Self::with_container(container, true)
    }

    fn with_container(container: Arc<ContainerState>, is_root: bool) -> Self {
        Self {
            inner: Arc::new(ScopeInner {
                container,
                is_root,
                owned: Mutex::new(Vec::new()),
                disposed: AtomicBool::new(false),
            }),
        }
    }

    /// Child scope sharing this container's registrations and single instances
    pub fn begin_lifetime_scope(&self) -> LifetimeScope {
        Self::with_container(Arc::clone(&self.inner.container), false)
    }

    /// Whether this is the container's root scope
    pub fn is_root(&self) -> bool {
        self.inner.is_root
    }

    /// Whether this scope or its container has been disposed
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
            || self.inner.container.disposed.load(Ordering::Acquire)
    }

    /// Number of explicit registrations in the container
    pub fn registration_count(&self) -> usize {
        self.inner.container.store.registration_count()
    }

    /// Release owned instances in reverse creation order
    ///
    /// Disposing the root scope also releases every owned single instance
    /// and makes every scope of the container unusable. Disposing twice is
    /// a no-op.
    pub fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        let owned = std::mem::take(
            &mut *self
                .inner
                .owned
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        let released = owned.len();
        owned.into_iter().rev().for_each(Tracked::release);

        if self.inner.is_root {
            let container = &self.inner.container;
            container.disposed.store(true, Ordering::Release);
            let singles = std::mem::take(
                &mut *container
                    .single_owned
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner),
            );
            debug!(
                released,
                single_instances = singles.len(),
                "disposing root scope"
            );
            singles.into_iter().rev().for_each(Tracked::release);
            container.single_instances.clear();
        } else {
            debug!(released, "disposed lifetime scope");
        }
    }

    pub(crate) fn single_instance_cell(&self, id: RegistrationId) -> Arc<OnceCell<Instance>> {
        // The map guard must be released before the cell is initialized
        let cell = self
            .inner
            .container
            .single_instances
            .entry(id)
            .or_insert_with(|| Arc::new(OnceCell::new()));
        Arc::clone(cell.value())
    }

    pub(crate) fn evict_single_instance(&self, id: RegistrationId) {
        self.inner.container.single_instances.remove(&id);
    }

    /// Remember an instance this container must release
    pub(crate) fn track(&self, registration: &Arc<ComponentRegistration>, instance: &Instance) {
        if registration.ownership() == InstanceOwnership::ExternallyOwned
            || registration.release_hooks().is_empty()
        {
            return;
        }
        let tracked = Tracked {
            registration: Arc::clone(registration),
            instance: Arc::clone(instance),
        };
        let owner = match registration.lifetime() {
            InstanceLifetime::SingleInstance => &self.inner.container.single_owned,
            InstanceLifetime::PerDependency => &self.inner.owned,
        };
        owner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tracked);
    }
}

impl ComponentContext for LifetimeScope {
    fn registrations_for(&self, service: &Service) -> Vec<Arc<ComponentRegistration>> {
        self.inner.container.store.registrations_for(service)
    }

    fn resolve_registration(
        &self,
        registration: &Arc<ComponentRegistration>,
        parameters: &[Parameter],
    ) -> Result<Instance> {
        if self.is_disposed() {
            return Err(Error::ScopeDisposed);
        }
        ResolveOperation::new(self).resolve_registration(registration, parameters)
    }

    fn scope(&self) -> SharedContext {
        Arc::new(self.clone())
    }
}

/// A built container: frozen registrations plus the root lifetime scope
pub struct Container {
    root: LifetimeScope,
}

impl Container {
    pub(crate) fn new(store: ComponentStore) -> Self {
        Self {
            root: LifetimeScope::root(store),
        }
    }

    /// Root lifetime scope
    pub fn root_scope(&self) -> &LifetimeScope {
        &self.root
    }

    /// Child scope of the root
    pub fn begin_lifetime_scope(&self) -> LifetimeScope {
        self.root.begin_lifetime_scope()
    }

    /// Number of explicit registrations
    pub fn registration_count(&self) -> usize {
        self.root.registration_count()
    }

    /// Dispose the root scope
    pub fn dispose(&self) {
        self.root.dispose();
    }

    /// Whether the container has been disposed
    pub fn is_disposed(&self) -> bool {
        self.root.is_disposed()
    }
}

impl ComponentContext for Container {
    fn registrations_for(&self, service: &Service) -> Vec<Arc<ComponentRegistration>> {
        self.root.registrations_for(service)
    }

    fn resolve_registration(
        &self,
        registration: &Arc<ComponentRegistration>,
        parameters: &[Parameter],
    ) -> Result<Instance> {
        self.root.resolve_registration(registration, parameters)
    }

    fn scope(&self) -> SharedContext {
        self.root.scope()
    }
}

//! Type-erased component instances

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{Error, Result};

/// A value produced by a registration or exported by a part
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Wrap a value as an [`Instance`]
pub fn instance<T: Any + Send + Sync>(value: T) -> Instance {
    Arc::new(value)
}

/// Recover the concrete type of an instance
pub fn downcast_instance<T: Any + Send + Sync>(instance: Instance) -> Result<Arc<T>> {
    let actual = (*instance).type_id();
    instance
        .downcast::<T>()
        .map_err(|_| Error::instance_type(std::any::type_name::<T>(), format!("{actual:?}")))
}

/// Produces a lazily evaluated instance
pub type InstanceFactory = Arc<dyn Fn() -> Result<Instance> + Send + Sync>;

/// Instance computed at most once, on first access
///
/// Clones share the same cached value. A failed computation is not cached.
#[derive(Clone)]
pub struct LazyValue {
    value: Arc<OnceCell<Instance>>,
    factory: InstanceFactory,
}

impl LazyValue {
    /// Value produced by `factory` on first access
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Instance> + Send + Sync + 'static,
    {
        Self {
            value: Arc::new(OnceCell::new()),
            factory: Arc::new(factory),
        }
    }

    /// Value that is already computed
    pub fn ready(value: Instance) -> Self {
        let cell = OnceCell::new();
        let _ = cell.set(Arc::clone(&value));
        Self {
            value: Arc::new(cell),
            factory: Arc::new(move || Ok(Arc::clone(&value))),
        }
    }

    /// The value, computing it on first access
    pub fn get(&self) -> Result<Instance> {
        self.value
            .get_or_try_init(|| (self.factory)())
            .map(Arc::clone)
    }

    /// Whether the value has been computed
    pub fn is_created(&self) -> bool {
        self.value.get().is_some()
    }
}

impl fmt::Debug for LazyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyValue")
            .field("created", &self.is_created())
            .finish_non_exhaustive()
    }
}

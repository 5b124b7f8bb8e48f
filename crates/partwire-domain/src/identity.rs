//! Type identity cache
//!
//! The catalog names types with strings derived from their Rust type names.
//! Each identity is computed once per type and recorded in a process-wide,
//! insertion-ordered side table so that a string can later be traced back to
//! the type that produced it. Entries are never removed.
//!
//! Reverse lookup is the only way back from a string: identities of generic
//! instantiations cannot be reconstructed by enumerating types.

use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::constants::{
    TYPE_IDENTITY_GENERIC_CLOSE, TYPE_IDENTITY_GENERIC_OPEN, TYPE_IDENTITY_PATH_SEPARATOR,
};
use crate::value_objects::TypeKey;

static GLOBAL_CACHE: LazyLock<Arc<TypeIdentityCache>> =
    LazyLock::new(|| Arc::new(TypeIdentityCache::new()));

/// Side table mapping types to the identity strings computed for them
#[derive(Debug, Default)]
pub struct TypeIdentityCache {
    entries: RwLock<Vec<(TypeKey, String)>>,
}

impl TypeIdentityCache {
    /// Empty, private cache
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL_CACHE)
    }

    /// Identity of `T`, computing and recording it on first use
    pub fn identity_of<T: ?Sized + 'static>(&self) -> String {
        let key = TypeKey::of::<T>();
        if let Some(identity) = self.cached(key) {
            return identity;
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some((_, identity)) = entries.iter().find(|(existing, _)| *existing == key) {
            return identity.clone();
        }
        let identity = format_type_identity(key.name());
        entries.push((key, identity.clone()));
        identity
    }

    /// First type whose recorded identity equals `identity`
    pub fn find_type(&self, identity: &str) -> Option<TypeKey> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|(_, recorded)| recorded == identity)
            .map(|(key, _)| *key)
    }

    /// Number of recorded types
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cached(&self, key: TypeKey) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, identity)| identity.clone())
    }
}

/// Identity of `T`, recorded in the process-wide cache
pub fn type_identity<T: ?Sized + 'static>() -> String {
    GLOBAL_CACHE.identity_of::<T>()
}

/// Turn a Rust type name into a type identity
///
/// `alloc::sync::Arc<dyn app::Greeter>` becomes `alloc.sync.Arc(app.Greeter)`.
pub fn format_type_identity(type_name: &str) -> String {
    type_name
        .replace("dyn ", "")
        .replace("::", TYPE_IDENTITY_PATH_SEPARATOR)
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '<' => TYPE_IDENTITY_GENERIC_OPEN,
            '>' => TYPE_IDENTITY_GENERIC_CLOSE,
            other => other,
        })
        .collect()
}

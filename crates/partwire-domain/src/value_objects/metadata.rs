//! Export and registration metadata
//!
//! Metadata values are opaque typed payloads. Each value remembers its
//! declared type so that imports can match on "key present with a value of
//! type T" without knowing anything else about the payload.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value_objects::TypeKey;

type Payload = dyn Any + Send + Sync;

/// A typed, opaque metadata payload
#[derive(Clone)]
pub struct MetadataValue {
    value_type: TypeKey,
    value: Arc<Payload>,
    eq: fn(&Payload, &Payload) -> bool,
    debug: fn(&Payload, &mut fmt::Formatter<'_>) -> fmt::Result,
}

fn eq_as<T: Any + PartialEq>(left: &Payload, right: &Payload) -> bool {
    match (left.downcast_ref::<T>(), right.downcast_ref::<T>()) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

fn debug_as<T: Any + fmt::Debug>(value: &Payload, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value.downcast_ref::<T>() {
        Some(value) => fmt::Debug::fmt(value, f),
        None => f.write_str("<?>"),
    }
}

impl MetadataValue {
    /// Wrap a value
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Send + Sync + PartialEq + fmt::Debug,
    {
        Self {
            value_type: TypeKey::of::<T>(),
            value: Arc::new(value),
            eq: eq_as::<T>,
            debug: debug_as::<T>,
        }
    }

    /// Declared type of the payload
    pub fn value_type(&self) -> TypeKey {
        self.value_type
    }

    /// Whether the payload is a `T`
    pub fn is<T: Any>(&self) -> bool {
        self.value_type.is::<T>()
    }

    /// Borrow the payload as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl PartialEq for MetadataValue {
    fn eq(&self, other: &Self) -> bool {
        self.value_type == other.value_type && (self.eq)(&*self.value, &*other.value)
    }
}

impl fmt::Debug for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.debug)(&*self.value, f)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::new(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<bool> for MetadataValue {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

impl From<i32> for MetadataValue {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl From<i64> for MetadataValue {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<u32> for MetadataValue {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<f64> for MetadataValue {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Insertion-ordered metadata map with lookup by key
///
/// Inserting an existing key replaces its value in place. Equality is
/// key-for-key and ignores insertion order.
#[derive(Clone, Default)]
pub struct Metadata {
    entries: Vec<(String, MetadataValue)>,
}

impl Metadata {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<MetadataValue>,
    {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`Metadata::insert`]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<MetadataValue>,
    {
        self.insert(key, value);
        self
    }

    /// Copy every entry of `other` into this map
    pub fn extend_from(&mut self, other: &Metadata) {
        for (key, value) in other.iter() {
            self.insert(key, value.clone());
        }
    }

    /// Look up an entry
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Look up an entry and borrow it as `T`
    pub fn get_as<T: Any>(&self, key: &str) -> Option<&T> {
        self.get(key).and_then(MetadataValue::downcast_ref::<T>)
    }

    /// Look up a required entry of type `T`
    pub fn require<T: Any>(&self, key: &str) -> Result<&T> {
        let value = self
            .get(key)
            .ok_or_else(|| Error::invalid_argument(format!("metadata key '{key}' is missing")))?;
        value.downcast_ref::<T>().ok_or_else(|| {
            Error::instance_type(std::any::type_name::<T>(), value.value_type().name())
        })
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Metadata {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl fmt::Debug for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>> FromIterator<(K, MetadataValue)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, MetadataValue)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

/// Strongly typed view over a [`Metadata`] map
///
/// Implemented by caller-defined structs that want typed access to export
/// metadata (see the metadata registration sources).
pub trait MetadataView: Sized + Send + Sync + 'static {
    /// Build the view, failing when required keys are missing or mistyped
    fn from_metadata(metadata: &Metadata) -> Result<Self>;
}

impl MetadataView for Metadata {
    fn from_metadata(metadata: &Metadata) -> Result<Self> {
        Ok(metadata.clone())
    }
}

impl MetadataView for () {
    fn from_metadata(_metadata: &Metadata) -> Result<Self> {
        Ok(())
    }
}

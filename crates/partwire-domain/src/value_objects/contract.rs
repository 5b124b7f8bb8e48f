//! Contract identities
//!
//! The catalog names everything with strings. A [`ContractName`] is the
//! canonical name of a contract; a [`ContractService`] pairs it with the type
//! identity of the value that flows through it, and is the registry-side
//! identity of a contract.

use std::fmt;

use crate::identity::type_identity;

/// Canonical string name of a contract
///
/// Two contract names are equal iff their strings are equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContractName(String);

impl ContractName {
    /// Create a contract name from a string
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// Contract name derived from a type (its type identity)
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(type_identity::<T>())
    }

    /// Borrow the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContractName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ContractName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&ContractName> for ContractName {
    fn from(value: &ContractName) -> Self {
        value.clone()
    }
}

impl AsRef<str> for ContractName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ContractName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ContractName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Registry-side identity of a contract
///
/// Matches only when both the contract name and the type identity are equal.
/// An empty type identity means the value is anonymous beyond its contract.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContractService {
    contract_name: ContractName,
    type_identity: String,
}

impl ContractService {
    /// Create a contract service
    pub fn new<C: Into<ContractName>, S: Into<String>>(contract_name: C, type_identity: S) -> Self {
        Self {
            contract_name: contract_name.into(),
            type_identity: type_identity.into(),
        }
    }

    /// Contract service whose name and type identity both come from `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        let identity = type_identity::<T>();
        Self {
            contract_name: ContractName::new(identity.clone()),
            type_identity: identity,
        }
    }

    /// Contract service with a custom name carrying values of type `T`
    pub fn named<T: ?Sized + 'static, C: Into<ContractName>>(contract_name: C) -> Self {
        Self {
            contract_name: contract_name.into(),
            type_identity: type_identity::<T>(),
        }
    }

    /// Contract name
    pub fn contract_name(&self) -> &ContractName {
        &self.contract_name
    }

    /// Type identity (empty when anonymous)
    pub fn type_identity(&self) -> &str {
        &self.type_identity
    }
}

impl fmt::Display for ContractService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.type_identity.is_empty() {
            write!(f, "contract '{}'", self.contract_name)
        } else {
            write!(
                f,
                "contract '{}' ({})",
                self.contract_name, self.type_identity
            )
        }
    }
}

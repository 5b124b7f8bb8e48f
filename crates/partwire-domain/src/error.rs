//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for partwire
#[derive(Error, Debug)]
pub enum Error {
    /// No registration answers the requested service
    ///
    /// Raised by single-service resolution and by exactly-one imports
    /// that found zero candidates.
    #[error("Component not registered: {service}")]
    ComponentNotRegistered {
        /// Display form of the requested service
        service: String,
    },

    /// The catalog produced an import definition that is not contract based
    #[error("Unsupported import: {import}")]
    UnsupportedImport {
        /// Description of the rejected import
        import: String,
    },

    /// Invalid argument provided to a public entry point
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// A registration depends on itself before it finished activating
    #[error("Circular dependency detected while resolving {service}")]
    CircularDependency {
        /// Display form of the registration being resolved twice
        service: String,
    },

    /// A part instance was driven through its lifecycle out of order
    #[error("Invalid part state: {message}")]
    InvalidPartState {
        /// Description of the offending transition
        message: String,
    },

    /// Resolution was attempted on a lifetime scope that was disposed
    #[error("Lifetime scope has been disposed")]
    ScopeDisposed,

    /// A resolved value did not have the expected runtime type
    #[error("Instance type mismatch: expected {expected}, found {actual}")]
    InstanceType {
        /// Type the caller asked for
        expected: String,
        /// Type that was actually produced
        actual: String,
    },

    /// A factory or activation hook failed
    #[error("Activation error: {message}")]
    Activation {
        /// Description of the activation failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create a component-not-registered error
    pub fn component_not_registered<S: ToString>(service: S) -> Self {
        Self::ComponentNotRegistered {
            service: service.to_string(),
        }
    }

    /// Create an unsupported-import error
    pub fn unsupported_import<S: Into<String>>(import: S) -> Self {
        Self::UnsupportedImport {
            import: import.into(),
        }
    }

    /// Create a circular dependency error
    pub fn circular_dependency<S: ToString>(service: S) -> Self {
        Self::CircularDependency {
            service: service.to_string(),
        }
    }

    /// Create an instance type mismatch error
    pub fn instance_type<E: Into<String>, A: Into<String>>(expected: E, actual: A) -> Self {
        Self::InstanceType {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

// Argument and state error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid part state error
    pub fn invalid_part_state<S: Into<String>>(message: S) -> Self {
        Self::InvalidPartState {
            message: message.into(),
        }
    }
}

// Activation error creation methods
impl Error {
    /// Create an activation error
    pub fn activation<S: Into<String>>(message: S) -> Self {
        Self::Activation {
            message: message.into(),
            source: None,
        }
    }

    /// Create an activation error with source
    pub fn activation_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Activation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration and I/O error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl Error {
    /// Whether this error reports a missing registration
    pub fn is_not_registered(&self) -> bool {
        matches!(self, Self::ComponentNotRegistered { .. })
    }
}

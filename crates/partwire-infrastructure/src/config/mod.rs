//! Configuration
//!
//! Layered configuration through Figment: built-in defaults, then a TOML
//! file, then `PARTWIRE__`-prefixed environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, CompositionConfig, ExposedServicesMode, LoggingConfig};

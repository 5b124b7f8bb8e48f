//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns around the bridge: configuration,
//! structured logging, error context and the composition root that turns
//! catalogs into a ready container.
//!
//! ## Module Categories
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-based configuration (defaults, TOML, environment) |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//!
//! ### Composition
//! | Module | Description |
//! |--------|-------------|
//! | [`bootstrap`] | Builds a container from catalogs and configuration |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use bootstrap::CompositionBootstrap;
pub use config::{AppConfig, CompositionConfig, ConfigLoader, ExposedServicesMode, LoggingConfig};
pub use error_ext::ErrorContext;

//! Main application configuration

use serde::{Deserialize, Serialize};

use super::{CompositionConfig, LoggingConfig};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Container composition configuration
    #[serde(default)]
    pub composition: CompositionConfig,
}

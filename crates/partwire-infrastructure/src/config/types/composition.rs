//! Container composition configuration

use serde::{Deserialize, Serialize};

/// Which extra services catalog exports are exposed under
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExposedServicesMode {
    /// Typed service by contract name, else keyed service by type identity
    #[default]
    Default,
    /// Contract services only
    None,
}

/// How the composition root builds the container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionConfig {
    /// Register every part type submitted to the link-time registry
    pub discover_parts: bool,

    /// Discovered part names to leave out
    pub excluded_parts: Vec<String>,

    /// Extra services for catalog exports
    pub exposed_services: ExposedServicesMode,

    /// Install the lazy and metadata wrapper sources
    pub metadata_sources: bool,
}

impl Default for CompositionConfig {
    fn default() -> Self {
        Self {
            discover_parts: true,
            excluded_parts: Vec::new(),
            exposed_services: ExposedServicesMode::Default,
            metadata_sources: true,
        }
    }
}

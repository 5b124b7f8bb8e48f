//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Reserved metadata keys are defined in `partwire_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "partwire.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "partwire";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "PARTWIRE";

/// Separator between the prefix and nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding a tracing filter directive
pub const LOG_FILTER_ENV_VAR: &str = "PARTWIRE_LOG";

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 10;

/// File name prefix used when the log path has no file stem
pub const DEFAULT_LOG_FILE_PREFIX: &str = "partwire";

//! Domain layer constants
//!
//! Reserved metadata keys and identity formatting rules shared by the
//! catalog model and the bridge.

// ============================================================================
// RESERVED METADATA KEYS
// ============================================================================

/// Export metadata key carrying the export type identity string
///
/// Distinct from the contract name; used when the exported value's runtime
/// type differs from the contract.
pub const EXPORT_TYPE_IDENTITY_METADATA_KEY: &str = "ExportTypeIdentity";

/// Part metadata key carrying the part's [`CreationPolicy`](crate::CreationPolicy)
pub const PART_CREATION_POLICY_METADATA_KEY: &str = "PartCreationPolicy";

// ============================================================================
// TYPE IDENTITY FORMATTING
// ============================================================================

/// Path separator used in type identities (replaces `::`)
pub const TYPE_IDENTITY_PATH_SEPARATOR: &str = ".";

/// Opening delimiter for generic arguments in type identities (replaces `<`)
pub const TYPE_IDENTITY_GENERIC_OPEN: char = '(';

/// Closing delimiter for generic arguments in type identities (replaces `>`)
pub const TYPE_IDENTITY_GENERIC_CLOSE: char = ')';

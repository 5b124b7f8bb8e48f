//! Contract Identity Resolver
//!
//! Maps string contract identities back to the types that produced them. The
//! lookup is a reverse scan of the type identity cache: identities of closed
//! generic instantiations cannot be recomputed by enumerating types, so the
//! only authoritative source is the table of identities already computed.

use std::sync::Arc;

use partwire_domain::constants::EXPORT_TYPE_IDENTITY_METADATA_KEY;
use partwire_domain::{ContractService, ExportDefinition, TypeIdentityCache, TypeKey};

/// Reverse lookup from contract identity to type
#[derive(Clone, Debug)]
pub struct ContractIdentityResolver {
    cache: Arc<TypeIdentityCache>,
}

impl ContractIdentityResolver {
    /// Resolver over the process-wide type identity cache
    pub fn new() -> Self {
        Self {
            cache: TypeIdentityCache::global(),
        }
    }

    /// Resolver over an explicit cache
    pub fn with_cache(cache: Arc<TypeIdentityCache>) -> Self {
        Self { cache }
    }

    /// Type whose identity equals `contract`, if any type computed it yet
    ///
    /// `None` is not an error: callers keep the export as a purely
    /// contract-named service.
    pub fn find_type(&self, contract: &str) -> Option<TypeKey> {
        if contract.is_empty() {
            return None;
        }
        self.cache.find_type(contract)
    }

    /// Type identity carried by an export, empty when the export is anonymous
    pub fn export_type_identity(export: &ExportDefinition) -> String {
        export
            .metadata()
            .get_as::<String>(EXPORT_TYPE_IDENTITY_METADATA_KEY)
            .cloned()
            .unwrap_or_default()
    }

    /// Registry-side identity of an export
    pub fn export_contract_service(export: &ExportDefinition) -> ContractService {
        ContractService::new(export.contract_name(), Self::export_type_identity(export))
    }
}

impl Default for ContractIdentityResolver {
    fn default() -> Self {
        Self::new()
    }
}

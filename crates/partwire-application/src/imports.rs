//! Import Satisfaction Engine
//!
//! Resolves a part's contract-based imports against the registry and assigns
//! the matched exports onto the part. Runs twice per part instance: from the
//! activating hook for prerequisite imports, and from the activated hook for
//! the rest, after which the part is activated.

use std::sync::Arc;

use partwire_domain::{
    ComponentContext, ComponentRegistration, ContractBasedImportDefinition, ContractService,
    Error, Export, ImportDefinition, Metadata, Result, Service, TypeKey,
};
use tracing::trace;

use crate::exports::resolve_export_registrations;
use crate::part_instance::PartInstance;

/// Satisfy the imports of `part` whose prerequisite flag equals `prerequisite`
///
/// Every selected import must be contract based; the check happens before
/// anything is resolved. With `prerequisite = false` the part is activated
/// once all its remaining imports are assigned.
pub fn set_imports(
    context: &dyn ComponentContext,
    part: &PartInstance,
    prerequisite: bool,
) -> Result<()> {
    let selected = part
        .import_definitions()
        .iter()
        .filter(|import| import.is_prerequisite() == prerequisite)
        .map(|import| {
            import
                .as_contract_based()
                .map(|contract| (import, contract))
                .ok_or_else(|| Error::unsupported_import(import.to_string()))
        })
        .collect::<Result<Vec<(&ImportDefinition, &ContractBasedImportDefinition)>>>()?;

    for (import, contract) in selected {
        let exports = resolve_import(context, contract)?;
        trace!(
            part = part.display_name(),
            %import,
            prerequisite,
            matched = exports.len(),
            "assigning import"
        );
        part.assign_import(import, exports)?;
    }

    if prerequisite {
        part.complete_prerequisites()
    } else {
        part.activate()
    }
}

/// Contract service an import is looked up by
pub fn import_contract_service(import: &ContractBasedImportDefinition) -> ContractService {
    ContractService::new(
        import.contract_name(),
        import.required_type_identity().unwrap_or_default(),
    )
}

/// Registrations that can satisfy `import`, in discovery order
///
/// A registration qualifies when it exposes the import's contract service and
/// its metadata holds every required key with a value of the required
/// declared type. Values themselves are not compared.
pub fn matching_registrations(
    context: &dyn ComponentContext,
    import: &ContractBasedImportDefinition,
) -> Vec<Arc<ComponentRegistration>> {
    context
        .registrations_for(&Service::Contract(import_contract_service(import)))
        .into_iter()
        .filter(|registration| has_required_metadata(registration.metadata(), import.required_metadata()))
        .collect()
}

/// Resolve the exports matched by `import`
///
/// An exactly-one import with no candidate fails with
/// `ComponentNotRegistered` naming the contract service.
pub fn resolve_import(
    context: &dyn ComponentContext,
    import: &ContractBasedImportDefinition,
) -> Result<Vec<Export>> {
    let candidates = matching_registrations(context, import);
    if candidates.is_empty() && import.cardinality().is_required() {
        return Err(Error::component_not_registered(import_contract_service(import)));
    }
    resolve_export_registrations(context, &candidates)
}

fn has_required_metadata(metadata: &Metadata, required: &[(String, TypeKey)]) -> bool {
    required.iter().all(|(key, value_type)| {
        metadata
            .get(key)
            .is_some_and(|value| value.value_type() == *value_type)
    })
}

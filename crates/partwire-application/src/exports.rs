//! Export resolution
//!
//! Resolving a contract service yields [`Export`] handles: every
//! registration exposing the contract contributes one handle carrying its
//! metadata and a lazily evaluated value.

use std::sync::Arc;

use partwire_domain::{
    ComponentContext, ComponentRegistration, ContractName, ContractService, Export, Result,
    Service, downcast_instance,
};

/// Exports of every registration exposing `contract`, in discovery order
///
/// No registration yields an empty vector, not an error.
pub fn resolve_exports(
    context: &dyn ComponentContext,
    contract: &ContractService,
) -> Result<Vec<Export>> {
    let registrations = context.registrations_for(&Service::Contract(contract.clone()));
    resolve_export_registrations(context, &registrations)
}

/// Exports of the type contract of `T`
pub fn resolve_exports_for<T: ?Sized + 'static>(
    context: &dyn ComponentContext,
) -> Result<Vec<Export>> {
    resolve_exports(context, &ContractService::of::<T>())
}

/// Exports of values of type `T` published under a custom contract name
pub fn resolve_exports_named<T, C>(
    context: &dyn ComponentContext,
    contract_name: C,
) -> Result<Vec<Export>>
where
    T: ?Sized + 'static,
    C: Into<ContractName>,
{
    resolve_exports(context, &ContractService::named::<T, _>(contract_name))
}

/// Resolve each registration and unwrap the export handle it produces
pub(crate) fn resolve_export_registrations(
    context: &dyn ComponentContext,
    registrations: &[Arc<ComponentRegistration>],
) -> Result<Vec<Export>> {
    registrations
        .iter()
        .map(|registration| {
            let value = context.resolve_registration(registration, &[])?;
            downcast_instance::<Export>(value).map(|export| Export::clone(&export))
        })
        .collect()
}

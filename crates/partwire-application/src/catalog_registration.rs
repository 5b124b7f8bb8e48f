//! Catalog-to-Registry Adapter
//!
//! One build-time pass over a catalog. Each part becomes a hidden
//! registration under a private marker; each export becomes a marker
//! registration exposed under its contract service, plus an optional
//! registration under the services chosen by the exposed services mapper.
//!
//! ```text
//! part marker ──► PartInstance        (activating: prerequisite imports)
//!                                     (activated: remaining imports + activate)
//! export marker + contract service ──► Export handle (value from the part)
//! mapped typed/keyed services ──────► export value
//! ```
//!
//! Every export is validated before the first registration is made, so a bad
//! definition never leaves a partially registered catalog behind.

use std::sync::Arc;

use partwire_domain::{
    ComponentContext, ComponentRegistry, ComposablePartCatalog, ComposablePartDefinition, Export,
    ExportDefinition, Instance, RegistrationBuilder, Result, Service, ServiceMarker,
    downcast_instance, instance, validate_export_definition,
};
use tracing::debug;

use crate::attributed::ComposablePartType;
use crate::exposed_services::{DefaultExposedServicesMapper, ExposedServicesMapper};
use crate::identity::ContractIdentityResolver;
use crate::imports::set_imports;
use crate::lifetime::PartSharing;
use crate::part_instance::PartInstance;

/// Register a catalog with the default exposed services mapper
pub fn register_catalog(
    registry: &mut dyn ComponentRegistry,
    catalog: Arc<dyn ComposablePartCatalog>,
) -> Result<ServiceMarker> {
    register_catalog_with(registry, catalog, &DefaultExposedServicesMapper::new())
}

/// Register a catalog and every part it contains
///
/// The catalog itself is registered as a single, externally owned instance
/// under a private marker, which is returned so the caller can resolve it
/// back with [`resolve_catalog`].
pub fn register_catalog_with(
    registry: &mut dyn ComponentRegistry,
    catalog: Arc<dyn ComposablePartCatalog>,
    mapper: &dyn ExposedServicesMapper,
) -> Result<ServiceMarker> {
    let parts = catalog.parts();
    for part in &parts {
        validate_part(part.as_ref())?;
    }

    let catalog_marker = ServiceMarker::new();
    registry.register(
        RegistrationBuilder::from_instance(instance(catalog)).as_service(catalog_marker.into()),
    )?;
    debug!(parts = parts.len(), %catalog_marker, "registering catalog");

    for part in parts {
        register_part(registry, part, mapper)?;
    }
    Ok(catalog_marker)
}

/// Resolve a catalog registered under `marker`
pub fn resolve_catalog(
    context: &dyn ComponentContext,
    marker: ServiceMarker,
) -> Result<Arc<dyn ComposablePartCatalog>> {
    let value = context.resolve_service(&Service::Marker(marker))?;
    downcast_instance::<Arc<dyn ComposablePartCatalog>>(value).map(|catalog| Arc::clone(&*catalog))
}

/// Register one part definition and its exports
///
/// Returns the private marker of the hidden part registration.
pub fn register_part(
    registry: &mut dyn ComponentRegistry,
    definition: Arc<dyn ComposablePartDefinition>,
    mapper: &dyn ExposedServicesMapper,
) -> Result<ServiceMarker> {
    validate_part(definition.as_ref())?;

    let sharing = PartSharing::of(definition.as_ref());
    let part_marker = ServiceMarker::new();
    let name = definition.display_name();

    let factory_definition = Arc::clone(&definition);
    let part_registration = RegistrationBuilder::from_factory(move |_, _| {
        let part = factory_definition.create_part()?;
        Ok(instance(PartInstance::new(
            factory_definition.display_name(),
            part,
        )))
    })
    .as_service(part_marker.into())
    .with_metadata_map(definition.metadata())
    .on_activating(|event| {
        let part = PartInstance::from_instance(event.instance)?;
        set_imports(event.context, &part, true)
    })
    .on_activated(|event| {
        let part = PartInstance::from_instance(event.instance)?;
        set_imports(event.context, &part, false)
    });

    registry.register(sharing.apply(part_registration))?;
    debug!(part = %name, ?sharing, exports = definition.export_definitions().len(), "registered part");

    for export in definition.export_definitions() {
        register_export(registry, mapper, part_marker, export, sharing)?;
    }
    Ok(part_marker)
}

/// Register one export of the part behind `part_marker`
///
/// The export registration carries the part's lifetime, so a shared part
/// backs every one of its exports with a single instance. Returns the
/// private marker of the export registration.
pub fn register_export(
    registry: &mut dyn ComponentRegistry,
    mapper: &dyn ExposedServicesMapper,
    part_marker: ServiceMarker,
    export: &ExportDefinition,
    sharing: PartSharing,
) -> Result<ServiceMarker> {
    validate_export_definition(export)?;

    let contract = ContractIdentityResolver::export_contract_service(export);
    let export_marker = ServiceMarker::new();

    let definition = export.clone();
    let export_registration = RegistrationBuilder::from_factory(move |context, _| {
        let part = resolve_part(context, part_marker)?;
        let wanted = definition.clone();
        Ok(instance(Export::new(definition.clone(), move || {
            part.exported_value(&wanted)
        })))
    })
    .as_service(export_marker.into())
    .as_service(Service::Contract(contract.clone()))
    .externally_owned()
    .with_metadata_map(export.metadata());
    registry.register(sharing.apply(export_registration))?;

    let exposed = mapper.map(export);
    debug!(%contract, exposed = exposed.len(), "registered export");
    if !exposed.is_empty() {
        let exposed_registration = RegistrationBuilder::from_factory(move |context, _| {
            let value = context.resolve_service(&Service::Marker(export_marker))?;
            downcast_instance::<Export>(value)?.value()
        })
        .as_services(exposed)
        .externally_owned()
        .with_metadata_map(export.metadata());
        registry.register(sharing.apply(exposed_registration))?;
    }
    Ok(export_marker)
}

/// Register the part described by a Rust type with the default mapper
pub fn register_part_type<T: ComposablePartType>(
    registry: &mut dyn ComponentRegistry,
) -> Result<ServiceMarker> {
    register_part_type_with::<T>(registry, &DefaultExposedServicesMapper::new())
}

/// Register the part described by a Rust type
pub fn register_part_type_with<T: ComposablePartType>(
    registry: &mut dyn ComponentRegistry,
    mapper: &dyn ExposedServicesMapper,
) -> Result<ServiceMarker> {
    register_part(registry, T::part_definition(), mapper)
}

fn resolve_part(context: &dyn ComponentContext, part_marker: ServiceMarker) -> Result<Arc<PartInstance>> {
    let value: Instance = context.resolve_service(&Service::Marker(part_marker))?;
    PartInstance::from_instance(&value)
}

fn validate_part(definition: &dyn ComposablePartDefinition) -> Result<()> {
    definition
        .export_definitions()
        .iter()
        .try_for_each(validate_export_definition)
}

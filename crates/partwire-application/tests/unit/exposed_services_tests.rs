//! Unit tests for exposed services mappers

use std::sync::Arc;

use partwire_application::{
    ContractIdentityResolver, DefaultExposedServicesMapper, ExplicitServices,
    ExposedServicesMapper, NoExposedServices, register_catalog_with, resolve_exports_for,
};
use partwire_domain::{
    ComponentContext, ComponentContextExt, Error, ExportDefinition, Metadata, Service,
    TypeIdentityCache,
};
use partwire_providers::{Container, ContainerBuilder};

use crate::fixtures::{Clock, Ticket, catalog_of, definition};

fn container_with(mapper: &dyn ExposedServicesMapper) -> Container {
    let mut builder = ContainerBuilder::new();
    register_catalog_with(
        &mut builder,
        Arc::new(catalog_of(&[definition::<Clock>, definition::<Ticket>])),
        mapper,
    )
    .expect("register");
    builder.build()
}

#[test]
fn test_no_exposed_services_keeps_contract_only() {
    let container = container_with(&NoExposedServices);

    assert!(!container.is_registered(&Service::typed::<Clock>()));
    assert_eq!(resolve_exports_for::<Clock>(&container).expect("exports").len(), 1);
}

#[test]
fn test_explicit_services_expose_listed_types_only() {
    let mapper = ExplicitServices::new([Service::typed::<Clock>()]).expect("mapper");
    let container = container_with(&mapper);

    assert_eq!(container.resolve::<Clock>().expect("typed").ticks, 42);
    assert!(!container.is_registered(&Service::typed::<Ticket>()));
}

#[test]
fn test_explicit_services_reject_empty_list() {
    let result = ExplicitServices::new(Vec::new());
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_closure_mapper() {
    let mapper = |export: &ExportDefinition| {
        if export.contract_name().as_str().ends_with("Ticket") {
            vec![Service::keyed::<Ticket, _>("ticket")]
        } else {
            Vec::new()
        }
    };
    let container = container_with(&mapper);

    assert!(container.resolve_keyed::<Ticket>("ticket").is_ok());
    assert!(!container.is_registered(&Service::typed::<Clock>()));
}

#[test]
fn test_default_mapper_ignores_unknown_identities() {
    let mapper =
        DefaultExposedServicesMapper::with_resolver(ContractIdentityResolver::with_cache(
            Arc::new(TypeIdentityCache::new()),
        ));
    let export = ExportDefinition::new("never.seen.Type", Metadata::new());
    assert!(mapper.map(&export).is_empty());
}

#[test]
fn test_non_shared_exposed_service_is_rebuilt() {
    let container = container_with(&DefaultExposedServicesMapper::new());
    let a = container.resolve::<Ticket>().expect("typed");
    let b = container.resolve::<Ticket>().expect("typed");
    assert!(!Arc::ptr_eq(&a, &b));
}

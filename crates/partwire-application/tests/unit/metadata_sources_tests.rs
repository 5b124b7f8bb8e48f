//! Unit tests for the lazy and metadata wrapper sources

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use partwire_application::{
    register_catalog, register_metadata_sources, resolve_all_lazy, resolve_all_meta, resolve_lazy,
    resolve_meta,
};
use partwire_domain::{
    ComponentRegistry, Metadata, MetadataView, RegistrationBuilder, Result, Service, instance,
};
use partwire_providers::{Container, ContainerBuilder};

use crate::fixtures::{
    Clock, EnglishGreeter, FrenchGreeter, SharedGreeter, catalog_of, definition,
};

#[derive(Debug)]
struct Endpoint(&'static str);

#[derive(Debug, PartialEq)]
struct EndpointInfo {
    region: String,
}

impl MetadataView for EndpointInfo {
    fn from_metadata(metadata: &Metadata) -> Result<Self> {
        Ok(Self {
            region: metadata.require::<String>("Region")?.clone(),
        })
    }
}

fn endpoints(with_sources: bool, built: &Arc<AtomicUsize>) -> Container {
    let mut builder = ContainerBuilder::new();
    for (name, region) in [("primary", "eu"), ("backup", "us")] {
        let counter = Arc::clone(built);
        builder
            .register(
                RegistrationBuilder::from_factory(move |_, _| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(instance(Endpoint(name)))
                })
                .as_type::<Endpoint>()
                .with_metadata("Region", region),
            )
            .expect("register");
    }
    if with_sources {
        register_metadata_sources(&mut builder);
    }
    builder.build()
}

#[test]
fn test_lazy_wrappers_defer_resolution() {
    let built = Arc::new(AtomicUsize::new(0));
    let container = endpoints(true, &built);

    let lazies = resolve_all_lazy::<Endpoint, EndpointInfo>(&container, &Service::typed::<Endpoint>())
        .expect("lazy");
    let regions: Vec<&str> = lazies
        .iter()
        .map(|lazy| lazy.metadata().region.as_str())
        .collect();
    assert_eq!(regions, ["eu", "us"]);
    assert_eq!(built.load(Ordering::SeqCst), 0);
    assert!(!lazies[1].is_value_created());

    assert_eq!(lazies[1].value().expect("value").0, "backup");
    assert!(lazies[1].is_value_created());
    assert_eq!(built.load(Ordering::SeqCst), 1);
}

#[test]
fn test_single_lazy_uses_last_registration() {
    let built = Arc::new(AtomicUsize::new(0));
    let container = endpoints(true, &built);

    let lazy = resolve_lazy::<Endpoint, Metadata>(&container, &Service::typed::<Endpoint>())
        .expect("lazy");
    assert_eq!(lazy.metadata().get_as::<String>("Region").map(String::as_str), Some("us"));
}

#[test]
fn test_meta_wrappers_resolve_eagerly() {
    let built = Arc::new(AtomicUsize::new(0));
    let container = endpoints(true, &built);

    let metas = resolve_all_meta::<Endpoint, EndpointInfo>(&container, &Service::typed::<Endpoint>())
        .expect("meta");
    assert_eq!(built.load(Ordering::SeqCst), 2);
    assert_eq!(metas[0].value().0, "primary");
    assert_eq!(
        metas[0].metadata(),
        &EndpointInfo {
            region: "eu".to_string()
        }
    );

    let last = resolve_meta::<Endpoint, EndpointInfo>(&container, &Service::typed::<Endpoint>())
        .expect("meta");
    assert_eq!(last.value().0, "backup");
}

#[test]
fn test_missing_metadata_key_fails_view() {
    let mut builder = ContainerBuilder::new();
    builder
        .register(RegistrationBuilder::from_instance(instance(Endpoint("bare"))).as_type::<Endpoint>())
        .expect("register");
    register_metadata_sources(&mut builder);
    let container = builder.build();

    let result = resolve_meta::<Endpoint, EndpointInfo>(&container, &Service::typed::<Endpoint>());
    assert!(result.is_err());
}

#[test]
fn test_without_sources_wrappers_are_unavailable() {
    let built = Arc::new(AtomicUsize::new(0));
    let container = endpoints(false, &built);
    let service = Service::typed::<Endpoint>();

    let error = resolve_lazy::<Endpoint, Metadata>(&container, &service)
        .err()
        .expect("no lazy source");
    assert!(error.is_not_registered());
    assert!(
        resolve_all_meta::<Endpoint, Metadata>(&container, &service)
            .expect("empty")
            .is_empty()
    );
}

#[test]
fn test_catalog_exports_carry_metadata_into_wrappers() {
    let mut builder = ContainerBuilder::new();
    register_catalog(
        &mut builder,
        Arc::new(catalog_of(&[
            definition::<Clock>,
            definition::<EnglishGreeter>,
            definition::<FrenchGreeter>,
        ])),
    )
    .expect("register");
    register_metadata_sources(&mut builder);
    let container = builder.build();

    let greeters = resolve_all_meta::<SharedGreeter, Metadata>(
        &container,
        &Service::typed::<SharedGreeter>(),
    )
    .expect("meta");
    let languages: Vec<&str> = greeters
        .iter()
        .filter_map(|greeter| greeter.metadata().get_as::<String>("Language"))
        .map(String::as_str)
        .collect();
    assert_eq!(languages, ["en", "fr"]);
    assert_eq!(greeters[1].value().greet(), "bonjour");
}

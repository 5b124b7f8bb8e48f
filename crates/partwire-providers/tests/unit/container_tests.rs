//! Unit tests for registration and resolution

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use partwire_domain::{
    ComponentContext, ComponentContextExt, ComponentRegistration, ComponentRegistry, Error,
    RegistrationAccessor, RegistrationBuilder, RegistrationSource, Service, instance,
};
use partwire_providers::ContainerBuilder;

#[derive(Debug, PartialEq)]
struct Endpoint(String);

#[test]
fn test_register_rejects_registration_without_services() {
    let mut builder = ContainerBuilder::new();
    let result = builder.register(RegistrationBuilder::from_factory(|_, _| Ok(instance(()))));
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    assert_eq!(builder.registration_count(), 0);
}

#[test]
fn test_register_instance_resolves_same_value() {
    let mut builder = ContainerBuilder::new();
    builder
        .register_instance(Endpoint("http://localhost".into()))
        .expect("register");
    let container = builder.build();

    let first = container.resolve::<Endpoint>().expect("resolve");
    let second = container.resolve::<Endpoint>().expect("resolve");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.0, "http://localhost");
}

#[test]
fn test_last_registration_wins() {
    let mut builder = ContainerBuilder::new();
    builder.register_instance(Endpoint("first".into())).expect("register");
    builder.register_instance(Endpoint("second".into())).expect("register");
    let container = builder.build();

    assert_eq!(container.resolve::<Endpoint>().expect("resolve").0, "second");
    let all = container.resolve_all_of::<Endpoint>().expect("resolve all");
    let names: Vec<&str> = all.iter().map(|endpoint| endpoint.0.as_str()).collect();
    assert_eq!(names, ["first", "second"]);
}

#[test]
fn test_missing_service_is_not_registered() {
    let container = ContainerBuilder::new().build();
    let error = container.resolve::<Endpoint>().expect_err("nothing registered");
    assert!(error.is_not_registered());
    assert!(container.resolve_all_of::<Endpoint>().expect("resolve all").is_empty());
    assert!(
        container
            .resolve_optional(&Service::typed::<Endpoint>())
            .expect("optional")
            .is_none()
    );
}

#[test]
fn test_per_dependency_builds_each_time() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let mut builder = ContainerBuilder::new();
    builder
        .register(
            RegistrationBuilder::from_factory(move |_, _| {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                Ok(instance(Endpoint(format!("endpoint-{n}"))))
            })
            .as_type::<Endpoint>(),
        )
        .expect("register");
    let container = builder.build();

    let first = container.resolve::<Endpoint>().expect("resolve");
    let second = container.resolve::<Endpoint>().expect("resolve");
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(built.load(Ordering::SeqCst), 2);
}

#[test]
fn test_single_instance_is_built_once_across_threads() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let mut builder = ContainerBuilder::new();
    builder
        .register(
            RegistrationBuilder::from_factory(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(instance(Endpoint("shared".into())))
            })
            .as_type::<Endpoint>()
            .single_instance(),
        )
        .expect("register");
    let container = Arc::new(builder.build());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let container = Arc::clone(&container);
            thread::spawn(move || container.resolve::<Endpoint>().expect("resolve"))
        })
        .collect();
    let resolved: Vec<Arc<Endpoint>> = handles
        .into_iter()
        .map(|handle| handle.join().expect("thread"))
        .collect();

    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert!(resolved.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

#[test]
fn test_activating_runs_before_activated_and_after_factory() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let (factory_log, activating_log, activated_log) =
        (Arc::clone(&events), Arc::clone(&events), Arc::clone(&events));
    let mut builder = ContainerBuilder::new();
    builder
        .register(
            RegistrationBuilder::from_factory(move |_, _| {
                factory_log.lock().expect("lock").push("factory");
                Ok(instance(Endpoint("hooked".into())))
            })
            .as_type::<Endpoint>()
            .on_activating(move |_| {
                activating_log.lock().expect("lock").push("activating");
                Ok(())
            })
            .on_activated(move |_| {
                activated_log.lock().expect("lock").push("activated");
                Ok(())
            }),
        )
        .expect("register");
    let container = builder.build();
    container.resolve::<Endpoint>().expect("resolve");

    assert_eq!(
        *events.lock().expect("lock"),
        ["factory", "activating", "activated"]
    );
}

#[test]
fn test_activated_hooks_run_after_outermost_resolution() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let inner_log = Arc::clone(&events);
    let outer_log = Arc::clone(&events);
    let mut builder = ContainerBuilder::new();
    builder
        .register(
            RegistrationBuilder::from_factory(|_, _| Ok(instance(7_u32)))
                .as_type::<u32>()
                .on_activated(move |_| {
                    inner_log.lock().expect("lock").push("inner activated");
                    Ok(())
                }),
        )
        .expect("register");
    builder
        .register(
            RegistrationBuilder::from_factory(move |context, _| {
                let value = context.resolve::<u32>()?;
                outer_log.lock().expect("lock").push("outer built");
                Ok(instance(Endpoint(format!("port-{value}"))))
            })
            .as_type::<Endpoint>(),
        )
        .expect("register");
    let container = builder.build();

    assert_eq!(container.resolve::<Endpoint>().expect("resolve").0, "port-7");
    assert_eq!(
        *events.lock().expect("lock"),
        ["outer built", "inner activated"]
    );
}

#[test]
fn test_circular_dependency_is_detected() {
    let mut builder = ContainerBuilder::new();
    builder
        .register(
            RegistrationBuilder::from_factory(|context, _| {
                context.resolve::<Endpoint>()?;
                Ok(instance(1_u8))
            })
            .as_type::<u8>()
            .single_instance(),
        )
        .expect("register");
    builder
        .register(
            RegistrationBuilder::from_factory(|context, _| {
                context.resolve::<u8>()?;
                Ok(instance(Endpoint("cycle".into())))
            })
            .as_type::<Endpoint>()
            .single_instance(),
        )
        .expect("register");
    let container = builder.build();

    let error = container.resolve::<u8>().expect_err("cycle");
    assert!(matches!(error, Error::CircularDependency { .. }));
}

#[test]
fn test_failed_activation_is_not_cached() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let mut builder = ContainerBuilder::new();
    builder
        .register(
            RegistrationBuilder::from_factory(|_, _| Ok(instance(Endpoint("flaky".into()))))
                .as_type::<Endpoint>()
                .single_instance()
                .on_activated(move |_| {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(Error::activation("first activation fails"))
                    } else {
                        Ok(())
                    }
                }),
        )
        .expect("register");
    let container = builder.build();

    assert!(matches!(
        container.resolve::<Endpoint>(),
        Err(Error::Activation { .. })
    ));
    let first = container.resolve::<Endpoint>().expect("second attempt");
    let second = container.resolve::<Endpoint>().expect("cached");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_registered_callback_can_register_more() {
    let mut builder = ContainerBuilder::new();
    builder
        .register(
            RegistrationBuilder::from_factory(|_, _| Ok(instance(Endpoint("primary".into()))))
                .as_type::<Endpoint>()
                .on_registered(|registry, registration| {
                    assert!(registration.exposes(&Service::typed::<Endpoint>()));
                    registry.register(
                        RegistrationBuilder::from_factory(|_, _| Ok(instance(42_u64)))
                            .as_type::<u64>(),
                    )?;
                    Ok(())
                }),
        )
        .expect("register");

    assert!(builder.is_registered(&Service::typed::<u64>()));
    let container = builder.build();
    assert_eq!(*container.resolve::<u64>().expect("resolve"), 42);
}

#[test]
fn test_registration_without_services_is_reachable_through_callback() {
    let mut builder = ContainerBuilder::new();
    builder
        .register(
            RegistrationBuilder::from_factory(|_, _| Ok(instance(Endpoint("hidden".into()))))
                .single_instance()
                .on_registered(|registry, registration| {
                    let target = Arc::clone(registration);
                    registry.register(
                        RegistrationBuilder::from_factory(move |context, _| {
                            context.resolve_registration(&target, &[])
                        })
                        .keyed::<Endpoint>("visible"),
                    )?;
                    Ok(())
                }),
        )
        .expect("register");
    assert_eq!(builder.registration_count(), 2);

    let container = builder.build();
    assert!(container.resolve::<Endpoint>().is_err());
    let endpoint = container.resolve_keyed::<Endpoint>("visible").expect("resolve");
    assert_eq!(endpoint.0, "hidden");
}

#[test]
fn test_failed_registered_callback_rolls_back() {
    let mut builder = ContainerBuilder::new();
    builder.register_instance(Endpoint("kept".into())).expect("register");

    let result = builder.register(
        RegistrationBuilder::from_factory(|_, _| Ok(instance(Endpoint("dropped".into()))))
            .as_type::<Endpoint>()
            .on_registered(|registry, _| {
                registry.register(
                    RegistrationBuilder::from_factory(|_, _| Ok(instance(7_u64))).as_type::<u64>(),
                )?;
                registry.register_source(Arc::new(EchoSource));
                Ok(())
            })
            .on_registered(|_, _| Err(Error::invalid_argument("rejected"))),
    );

    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    assert_eq!(builder.registration_count(), 1);
    assert!(!builder.is_registered(&Service::typed::<u64>()));

    let container = builder.build();
    assert_eq!(container.resolve::<Endpoint>().expect("resolve").0, "kept");
    let lazy = Service::Lazy(Box::new(Service::typed::<Endpoint>()));
    assert!(container.registrations_for(&lazy).is_empty());
}

struct EchoSource;

impl RegistrationSource for EchoSource {
    fn registrations_for(
        &self,
        service: &Service,
        registrations: RegistrationAccessor<'_>,
    ) -> Vec<ComponentRegistration> {
        let Service::Lazy(inner) = service else {
            return Vec::new();
        };
        registrations(inner)
            .into_iter()
            .map(|target| {
                RegistrationBuilder::from_factory(move |context, _| {
                    context.resolve_registration(&target, &[])
                })
                .as_service(service.clone())
                .build()
                .0
            })
            .collect()
    }
}

#[test]
fn test_registration_source_answers_unregistered_services() {
    let mut builder = ContainerBuilder::new();
    builder.register_instance(Endpoint("a".into())).expect("register");
    builder.register_instance(Endpoint("b".into())).expect("register");
    builder.register_source(Arc::new(EchoSource));
    let container = builder.build();

    let lazy = Service::lazy(Service::typed::<Endpoint>());
    assert!(container.is_registered(&lazy));
    let values = container.resolve_all(&lazy).expect("resolve all");
    assert_eq!(values.len(), 2);

    // Source results are cached per service
    let first = container.registrations_for(&lazy);
    let second = container.registrations_for(&lazy);
    assert!(Arc::ptr_eq(&first[0], &second[0]));

    assert!(!container.is_registered(&Service::lazy(Service::typed::<u8>())));
}

//! Unit tests for lifetime scopes and release

use std::sync::{Arc, Mutex};

use partwire_domain::{
    ComponentContext, ComponentContextExt, ComponentRegistry, Error, RegistrationBuilder,
    downcast_instance, instance,
};
use partwire_providers::{Container, ContainerBuilder};

#[derive(Debug)]
struct Connection(u32);

fn container_with_release_log(single: bool) -> (Container, Arc<Mutex<Vec<u32>>>) {
    let released = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&released);
    let next = Arc::new(Mutex::new(0_u32));
    let mut registration = RegistrationBuilder::from_factory(move |_, _| {
        let mut next = next.lock().expect("lock");
        *next += 1;
        Ok(instance(Connection(*next)))
    })
    .as_type::<Connection>()
    .on_release(move |value| {
        if let Ok(connection) = downcast_instance::<Connection>(Arc::clone(value)) {
            log.lock().expect("lock").push(connection.0);
        }
    });
    if single {
        registration = registration.single_instance();
    }

    let mut builder = ContainerBuilder::new();
    builder.register(registration).expect("register");
    (builder.build(), released)
}

#[test]
fn test_scope_releases_owned_instances_in_reverse_order() {
    let (container, released) = container_with_release_log(false);
    let scope = container.begin_lifetime_scope();
    scope.resolve::<Connection>().expect("resolve");
    scope.resolve::<Connection>().expect("resolve");
    scope.resolve::<Connection>().expect("resolve");

    scope.dispose();
    assert_eq!(*released.lock().expect("lock"), [3, 2, 1]);

    scope.dispose();
    assert_eq!(released.lock().expect("lock").len(), 3);
}

#[test]
fn test_disposed_scope_rejects_resolution() {
    let (container, _) = container_with_release_log(false);
    let scope = container.begin_lifetime_scope();
    scope.dispose();

    assert!(scope.is_disposed());
    assert!(matches!(
        scope.resolve::<Connection>(),
        Err(Error::ScopeDisposed)
    ));
    // Siblings and the root are unaffected
    assert!(container.begin_lifetime_scope().resolve::<Connection>().is_ok());
    assert!(container.resolve::<Connection>().is_ok());
}

#[test]
fn test_single_instances_are_released_with_the_root() {
    let (container, released) = container_with_release_log(true);
    let scope = container.begin_lifetime_scope();
    let from_scope = scope.resolve::<Connection>().expect("resolve");
    let from_root = container.resolve::<Connection>().expect("resolve");
    assert!(Arc::ptr_eq(&from_scope, &from_root));

    scope.dispose();
    assert!(released.lock().expect("lock").is_empty());

    container.dispose();
    assert_eq!(*released.lock().expect("lock"), [1]);
    assert!(container.is_disposed());
    assert!(matches!(
        container.resolve::<Connection>(),
        Err(Error::ScopeDisposed)
    ));
    assert!(matches!(
        container.begin_lifetime_scope().resolve::<Connection>(),
        Err(Error::ScopeDisposed)
    ));
}

#[test]
fn test_externally_owned_instances_are_not_released() {
    let released = Arc::new(Mutex::new(0_usize));
    let log = Arc::clone(&released);
    let mut builder = ContainerBuilder::new();
    builder
        .register(
            RegistrationBuilder::from_factory(|_, _| Ok(instance(Connection(9))))
                .as_type::<Connection>()
                .externally_owned()
                .on_release(move |_| *log.lock().expect("lock") += 1),
        )
        .expect("register");
    let container = builder.build();
    let scope = container.begin_lifetime_scope();
    scope.resolve::<Connection>().expect("resolve");
    scope.dispose();
    container.dispose();

    assert_eq!(*released.lock().expect("lock"), 0);
}

#[test]
fn test_scope_handle_outlives_resolution() {
    let mut builder = ContainerBuilder::new();
    builder
        .register(
            RegistrationBuilder::from_factory(|context, _| Ok(instance(context.scope())))
                .as_type::<partwire_domain::SharedContext>(),
        )
        .expect("register");
    builder
        .register(RegistrationBuilder::from_factory(|_, _| Ok(instance(Connection(5)))).as_type::<Connection>())
        .expect("register");
    let container = builder.build();
    let scope = container.begin_lifetime_scope();

    let handle = scope
        .resolve::<partwire_domain::SharedContext>()
        .expect("resolve");
    assert_eq!(handle.resolve::<Connection>().expect("resolve").0, 5);

    scope.dispose();
    assert!(matches!(
        handle.resolve::<Connection>(),
        Err(Error::ScopeDisposed)
    ));
}

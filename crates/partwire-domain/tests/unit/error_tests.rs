//! Unit tests for domain error types

use partwire_domain::{Error, Service};

#[test]
fn test_component_not_registered_error() {
    let error = Error::component_not_registered(Service::typed::<u32>());
    match &error {
        Error::ComponentNotRegistered { service } => assert_eq!(service, "u32"),
        _ => panic!("Expected ComponentNotRegistered error"),
    }
    assert!(error.is_not_registered());
}

#[test]
fn test_unsupported_import_error() {
    let error = Error::unsupported_import("constraint import 'anything'");
    match error {
        Error::UnsupportedImport { import } => {
            assert_eq!(import, "constraint import 'anything'");
        }
        _ => panic!("Expected UnsupportedImport error"),
    }
}

#[test]
fn test_invalid_argument_error() {
    let error = Error::invalid_argument("Invalid input provided");
    match error {
        Error::InvalidArgument { message } => assert_eq!(message, "Invalid input provided"),
        _ => panic!("Expected InvalidArgument error"),
    }
}

#[test]
fn test_circular_dependency_display() {
    let error = Error::circular_dependency("contract 'Loop'");
    assert_eq!(
        error.to_string(),
        "Circular dependency detected while resolving contract 'Loop'"
    );
    assert!(!error.is_not_registered());
}

#[test]
fn test_activation_error_with_source() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "hook failed");
    let error = Error::activation_with_source("activated hook", io_error);
    match error {
        Error::Activation { message, source } => {
            assert_eq!(message, "activated hook");
            assert!(source.is_some());
        }
        _ => panic!("Expected Activation error"),
    }
}

#[test]
fn test_io_error() {
    let error = Error::io("File not found");
    match error {
        Error::Io { message, source: _ } => {
            assert_eq!(message, "File not found");
        }
        _ => panic!("Expected Io error"),
    }
}

#[test]
fn test_scope_disposed_display() {
    assert_eq!(
        Error::ScopeDisposed.to_string(),
        "Lifetime scope has been disposed"
    );
}

//! Unit tests for contract names, contract services and services

use partwire_domain::{ContractName, ContractService, Service, ServiceMarker, type_identity};

mod app {
    pub struct Widget;
    pub struct Holder<T>(pub T);
}

#[test]
fn test_contract_names_compare_by_string() {
    assert_eq!(ContractName::from("Greeter"), ContractName::new("Greeter".to_string()));
    assert_ne!(ContractName::from("Greeter"), ContractName::from("greeter"));
    assert_eq!(ContractName::from("Greeter"), "Greeter");
}

#[test]
fn test_type_contract_name_is_dotted_type_path() {
    let name = ContractName::of::<app::Widget>();
    assert!(name.as_str().ends_with("app.Widget"));
    assert!(!name.as_str().contains("::"));
}

#[test]
fn test_generic_type_identity_uses_parentheses() {
    let identity = type_identity::<app::Holder<app::Widget>>();
    assert!(identity.contains("app.Holder("));
    assert!(identity.ends_with("app.Widget)"));
    assert!(!identity.contains('<'));
}

#[test]
fn test_contract_service_requires_both_parts_equal() {
    let typed = ContractService::named::<app::Widget, _>("Widgets");
    let anonymous = ContractService::new("Widgets", "");

    assert_ne!(typed, anonymous);
    assert_eq!(typed, ContractService::named::<app::Widget, _>("Widgets"));
    assert_eq!(anonymous.type_identity(), "");
}

#[test]
fn test_contract_service_of_type() {
    let service = ContractService::of::<app::Widget>();
    assert_eq!(service.contract_name().as_str(), service.type_identity());
}

#[test]
fn test_service_markers_are_unique() {
    let first = Service::from(ServiceMarker::new());
    let second = Service::from(ServiceMarker::new());
    assert_ne!(first, second);
}

#[test]
fn test_wrapped_service_display() {
    let service = Service::lazy(Service::keyed::<u8, _>("small"));
    assert_eq!(service.to_string(), "Lazy<(small) u8>");
    assert_eq!(service.inner(), Some(&Service::keyed::<u8, _>("small")));
}

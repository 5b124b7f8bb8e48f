//! Unit tests for export handles and import definitions

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use partwire_domain::{
    ConstraintImportDefinition, ContractBasedImportDefinition, Export, ExportDefinition,
    Error, ImportCardinality, ImportDefinition, LazyValue, Metadata, downcast_instance, instance,
    validate_export_definition,
};

#[test]
fn test_export_value_is_computed_once_on_demand() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let export = Export::new(ExportDefinition::new("Numbers", Metadata::new()), move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(instance(42_u32))
    });

    assert!(!export.is_value_created());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let clone = export.clone();
    assert_eq!(*export.value_as::<u32>().unwrap(), 42);
    assert_eq!(*clone.value_as::<u32>().unwrap(), 42);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(clone.is_value_created());
}

#[test]
fn test_export_value_type_mismatch() {
    let export = Export::from_value(
        ExportDefinition::new("Numbers", Metadata::new()),
        instance(1_u8),
    );
    assert!(export.value_as::<String>().is_err());
}

#[test]
fn test_empty_contract_name_is_rejected() {
    let definition = ExportDefinition::new("", Metadata::new());
    assert!(validate_export_definition(&definition).is_err());
}

#[test]
fn test_contract_import_defaults() {
    let import = ContractBasedImportDefinition::new("Logger", ImportCardinality::ExactlyOne)
        .requiring_metadata::<String>("Name");

    assert!(!import.is_prerequisite());
    assert!(import.required_type_identity().is_none());
    assert_eq!(import.required_metadata().len(), 1);

    let import = ImportDefinition::from(import.prerequisite(true));
    assert!(import.is_prerequisite());
    assert!(import.cardinality().is_required());
    assert!(import.as_contract_based().is_some());
}

#[test]
fn test_constraint_import_is_not_contract_based() {
    let import = ImportDefinition::from(ConstraintImportDefinition::new(
        "anything",
        ImportCardinality::ZeroOrMore,
        |_| true,
    ));
    assert!(import.as_contract_based().is_none());
    assert_eq!(import.to_string(), "constraint import 'anything'");
}

#[test]
fn test_lazy_value_clones_share_one_computation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let lazy = LazyValue::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(instance(String::from("built")))
    });
    let copy = lazy.clone();

    let first = copy.get().expect("value");
    assert!(lazy.is_created());
    let second = lazy.get().expect("value");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_lazy_value_failure_is_retried() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let lazy = LazyValue::new(move || {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(Error::invalid_argument("not yet"))
        } else {
            Ok(instance(7_u8))
        }
    });

    assert!(lazy.get().is_err());
    assert!(!lazy.is_created());
    let value = downcast_instance::<u8>(lazy.get().expect("second attempt")).expect("u8");
    assert_eq!(*value, 7);
}

#[test]
fn test_ready_lazy_value_is_created() {
    let lazy = LazyValue::ready(instance(3_i64));
    assert!(lazy.is_created());
    assert_eq!(*downcast_instance::<i64>(lazy.get().expect("value")).expect("i64"), 3);
}

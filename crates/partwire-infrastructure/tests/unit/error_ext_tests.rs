//! Error context extension tests

use std::io;

use partwire_domain::Error;
use partwire_infrastructure::ErrorContext;

fn failing_io() -> std::result::Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "missing file"))
}

#[test]
fn test_context_wraps_as_internal() {
    let error = failing_io().context("loading catalog").unwrap_err();
    assert!(matches!(error, Error::Internal { .. }));
    assert!(error.to_string().contains("loading catalog: missing file"));
}

#[test]
fn test_typed_contexts_keep_source() {
    let error = failing_io().io_context("reading").unwrap_err();
    assert!(matches!(error, Error::Io { source: Some(_), .. }));

    let error = failing_io().config_context("parsing").unwrap_err();
    assert!(matches!(error, Error::Configuration { source: Some(_), .. }));
}

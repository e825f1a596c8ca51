//! Tests for error display formatting.

use super::*;

#[test]
fn not_registered_names_the_requested_type() {
    let err = ResolveError::NotRegistered {
        type_name: "alloc::string::String",
    };
    assert_eq!(
        err.to_string(),
        "no service registered for type `alloc::string::String`"
    );
}

#[test]
fn invalid_path_names_the_offending_path() {
    let source = url::Url::parse("not a url").unwrap_err();
    let err = HostError::InvalidPath {
        path: "::bad::".to_string(),
        source,
    };
    assert!(err.to_string().contains("::bad::"));
}

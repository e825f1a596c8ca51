//! Tests for the service registry and its builder.

use super::*;

trait Greeter: Send + Sync {
    fn greet(&self) -> &'static str;
}

struct EnglishGreeter;

impl Greeter for EnglishGreeter {
    fn greet(&self) -> &'static str {
        "hello"
    }
}

#[test]
fn resolves_registered_singleton() {
    let registry = ServiceRegistryBuilder::new()
        .register("shared-value".to_string())
        .build();

    let value = registry.get::<String>().unwrap();
    assert_eq!(*value, "shared-value");
}

#[test]
fn repeated_resolution_returns_the_same_instance() {
    let registry = ServiceRegistryBuilder::new().register(42_u64).build();

    let first = registry.get::<u64>().unwrap();
    let second = registry.get::<u64>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn resolves_trait_object_by_trait_type() {
    let registry = ServiceRegistryBuilder::new()
        .register_arc::<dyn Greeter>(Arc::new(EnglishGreeter))
        .build();

    let greeter = registry.get::<dyn Greeter>().unwrap();
    assert_eq!(greeter.greet(), "hello");
}

#[test]
fn unregistered_type_fails_with_type_name() {
    let registry = ServiceRegistryBuilder::new().build();

    let err = registry.get::<String>().unwrap_err();
    let ResolveError::NotRegistered { type_name } = err;
    assert!(type_name.contains("String"));
}

#[test]
fn last_registration_wins() {
    let registry = ServiceRegistryBuilder::new()
        .register("first".to_string())
        .register("second".to_string())
        .build();

    let value = registry.get::<String>().unwrap();
    assert_eq!(*value, "second");
}

#[test]
fn scoped_factory_is_not_visible_as_singleton() {
    let registry = ServiceRegistryBuilder::new()
        .register_scoped::<String, _>(|| Arc::new("per-scope".to_string()))
        .build();

    assert!(registry.get::<String>().is_err());
    assert!(registry.scoped_factory::<String>().is_some());
}

//! Application-wide service registry.
//!
//! The registry is the dependency-resolution surface the harness consumes. It
//! is a type-keyed map of shared singletons plus factories for services that
//! must be re-created per test scope. It is built once, before the first test
//! runs, and is immutable afterwards, so lookups need no locking.
//!
//! Both concrete types and trait objects can be registered:
//!
//! ```
//! use std::sync::Arc;
//! use app_host::ServiceRegistryBuilder;
//!
//! trait Clock: Send + Sync {}
//! struct SystemClock;
//! impl Clock for SystemClock {}
//!
//! let registry = ServiceRegistryBuilder::new()
//!     .register("connection-string".to_string())
//!     .register_arc::<dyn Clock>(Arc::new(SystemClock))
//!     .build();
//!
//! assert!(registry.get::<String>().is_ok());
//! assert!(registry.get::<dyn Clock>().is_ok());
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::ResolveError;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

type BoxedEntry = Box<dyn Any + Send + Sync>;

/// A factory producing a fresh instance of `T` for each scope.
struct ScopedFactory<T: ?Sized>(Arc<dyn Fn() -> Arc<T> + Send + Sync>);

/// Immutable, type-keyed container of application services.
///
/// Singletons are stored as `Arc<T>` and handed out by clone; scoped
/// registrations are factories consulted by [`ServiceScope`](crate::ServiceScope).
#[derive(Default)]
pub struct ServiceRegistry {
    singletons: HashMap<TypeId, BoxedEntry>,
    scoped: HashMap<TypeId, BoxedEntry>,
}

impl ServiceRegistry {
    /// Resolve the singleton registered for `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotRegistered`] when no singleton was
    /// registered for `T`.
    pub fn get<T>(&self) -> Result<Arc<T>, ResolveError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.singletons
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<Arc<T>>())
            .cloned()
            .ok_or_else(|| ResolveError::NotRegistered {
                type_name: std::any::type_name::<T>(),
            })
    }

    /// Look up the scoped factory for `T`, if one was registered.
    pub(crate) fn scoped_factory<T>(&self) -> Option<Arc<dyn Fn() -> Arc<T> + Send + Sync>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.scoped
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<ScopedFactory<T>>())
            .map(|factory| Arc::clone(&factory.0))
    }
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("singletons", &self.singletons.len())
            .field("scoped", &self.scoped.len())
            .finish()
    }
}

/// Builder for [`ServiceRegistry`].
///
/// Registering the same type twice keeps the last registration.
#[derive(Default)]
pub struct ServiceRegistryBuilder {
    singletons: HashMap<TypeId, BoxedEntry>,
    scoped: HashMap<TypeId, BoxedEntry>,
}

impl ServiceRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a concrete singleton.
    #[must_use]
    pub fn register<T>(self, service: T) -> Self
    where
        T: Send + Sync + 'static,
    {
        self.register_arc(Arc::new(service))
    }

    /// Register an already-shared singleton.
    ///
    /// This form also accepts unsized targets, so trait objects can be
    /// registered and resolved by their trait type.
    #[must_use]
    pub fn register_arc<T>(mut self, service: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.singletons.insert(TypeId::of::<T>(), Box::new(service));
        self
    }

    /// Register a factory invoked once per scope for `T`.
    #[must_use]
    pub fn register_scoped<T, F>(mut self, factory: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        self.scoped.insert(
            TypeId::of::<T>(),
            Box::new(ScopedFactory::<T>(Arc::new(factory))),
        );
        self
    }

    pub fn build(self) -> ServiceRegistry {
        ServiceRegistry {
            singletons: self.singletons,
            scoped: self.scoped,
        }
    }
}

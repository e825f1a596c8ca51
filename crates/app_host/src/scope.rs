//! Per-test resolution scopes.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use crate::errors::ResolveError;
use crate::registry::ServiceRegistry;

#[cfg(test)]
#[path = "scope_tests.rs"]
mod tests;

/// A resolution context for services that must not leak across tests.
///
/// The scope caches every scoped service it instantiates, so repeated
/// resolution of the same type within one scope yields the same instance.
/// Types without a scoped registration fall through to the application-wide
/// singletons. Dropping the scope releases every instance it owns.
pub struct ServiceScope {
    id: Uuid,
    root: Arc<ServiceRegistry>,
    instances: Mutex<HashMap<TypeId, Box<dyn Any + Send + Sync>>>,
}

impl ServiceScope {
    pub fn new(root: Arc<ServiceRegistry>) -> Self {
        Self {
            id: Uuid::new_v4(),
            root,
            instances: Mutex::new(HashMap::new()),
        }
    }

    /// Identifier for correlating scope lifetimes in logs.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Resolve `T` from this scope.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotRegistered`] when `T` has neither a scoped
    /// factory nor a singleton registration.
    pub fn get<T>(&self) -> Result<Arc<T>, ResolveError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let mut instances = self
            .instances
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = instances
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<Arc<T>>())
        {
            return Ok(Arc::clone(existing));
        }

        if let Some(factory) = self.root.scoped_factory::<T>() {
            let instance = factory();
            instances.insert(TypeId::of::<T>(), Box::new(Arc::clone(&instance)));
            tracing::trace!(
                scope_id = %self.id,
                service = std::any::type_name::<T>(),
                "instantiated scoped service"
            );
            return Ok(instance);
        }

        // Singletons resolve through scopes as well.
        self.root.get::<T>()
    }
}

impl std::fmt::Debug for ServiceScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceScope").field("id", &self.id).finish()
    }
}

use crate::container::scope::ServiceScope;
use crate::errors::{CoreError, CoreResult};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Type-erased transient factory
pub type Factory = Arc<dyn Fn(&ServiceRegistry) -> CoreResult<Box<dyn Any + Send + Sync>> + Send + Sync>;

/// Service entry in the registry
#[derive(Clone)]
pub enum ServiceEntry {
    /// Single instance (singleton)
    Instance(Arc<dyn Any + Send + Sync>),
    /// Factory function for creating instances
    Factory(Factory),
}

impl std::fmt::Debug for ServiceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceEntry::Instance(_) => f.debug_tuple("Instance").field(&"<instance>").finish(),
            ServiceEntry::Factory(_) => f.debug_tuple("Factory").field(&"<factory>").finish(),
        }
    }
}

#[derive(Debug, Clone)]
struct Registration {
    type_name: &'static str,
    scope: ServiceScope,
    entry: ServiceEntry,
}

/// Type-keyed registry of capability bindings
///
/// The registry is a shared handle: clones see the same bindings. Setup code
/// mutates it once during startup; afterwards request handlers only resolve.
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    services: Arc<RwLock<HashMap<TypeId, Registration>>>,
}

impl ServiceRegistry {
    /// Create a new service registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a singleton service, replacing any previous binding for `T`
    pub fn register_singleton<T>(&mut self, service: T) -> CoreResult<()>
    where
        T: Send + Sync + 'static,
    {
        self.register_shared(Arc::new(service))
    }

    /// Register an already shared singleton
    pub fn register_shared<T>(&mut self, service: Arc<T>) -> CoreResult<()>
    where
        T: Send + Sync + 'static,
    {
        self.insert::<T>(ServiceScope::Singleton, ServiceEntry::Instance(service))
    }

    /// Register a transient service factory
    ///
    /// The factory receives the registry so it can resolve its own
    /// dependencies; it runs on every resolution.
    pub fn register_transient<T, F>(&mut self, factory: F) -> CoreResult<()>
    where
        T: Send + Sync + 'static,
        F: Fn(&ServiceRegistry) -> CoreResult<T> + Send + Sync + 'static,
    {
        let wrapped: Factory = Arc::new(move |registry: &ServiceRegistry| -> CoreResult<Box<dyn Any + Send + Sync>> {
            Ok(Box::new(factory(registry)?))
        });
        self.insert::<T>(ServiceScope::Transient, ServiceEntry::Factory(wrapped))
    }

    fn insert<T: 'static>(&mut self, scope: ServiceScope, entry: ServiceEntry) -> CoreResult<()> {
        let type_name = std::any::type_name::<T>();
        let mut services = self
            .services
            .write()
            .map_err(|_| CoreError::lock_error("service_registry"))?;

        if services.contains_key(&TypeId::of::<T>()) {
            tracing::debug!(service = type_name, "replacing existing registration");
        }
        tracing::trace!(service = type_name, scope = %scope, "registering service");

        services.insert(
            TypeId::of::<T>(),
            Registration {
                type_name,
                scope,
                entry,
            },
        );
        Ok(())
    }

    /// Resolve a service instance
    pub fn resolve<T>(&self) -> CoreResult<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let entry = {
            let services = self
                .services
                .read()
                .map_err(|_| CoreError::lock_error("service_registry"))?;
            services
                .get(&TypeId::of::<T>())
                .map(|registration| registration.entry.clone())
                .ok_or_else(|| CoreError::service_not_found(std::any::type_name::<T>()))?
        };

        // The lock is released before a factory runs so it may resolve further services
        match entry {
            ServiceEntry::Instance(instance) => instance
                .downcast::<T>()
                .map_err(|_| CoreError::service_not_found(std::any::type_name::<T>())),
            ServiceEntry::Factory(factory) => {
                let instance = factory(self)?;
                let boxed = instance
                    .downcast::<T>()
                    .map_err(|_| CoreError::service_not_found(std::any::type_name::<T>()))?;
                Ok(Arc::new(*boxed))
            }
        }
    }

    /// Try to resolve a service instance
    pub fn try_resolve<T>(&self) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        self.resolve::<T>().ok()
    }

    /// Check if a service type is registered
    pub fn contains<T: 'static>(&self) -> bool {
        self.services
            .read()
            .map(|services| services.contains_key(&TypeId::of::<T>()))
            .unwrap_or(false)
    }

    /// Scope a service type was registered with
    pub fn scope_of<T: 'static>(&self) -> Option<ServiceScope> {
        self.services
            .read()
            .ok()?
            .get(&TypeId::of::<T>())
            .map(|registration| registration.scope)
    }

    /// Get the number of registered services
    pub fn service_count(&self) -> usize {
        self.services.read().map(|services| services.len()).unwrap_or(0)
    }

    /// Type names of all registered services, sorted
    pub fn registered_services(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .services
            .read()
            .map(|services| services.values().map(|registration| registration.type_name).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct TestService {
        id: usize,
        counter: AtomicUsize,
    }

    impl TestService {
        fn new() -> Self {
            static NEXT_ID: AtomicUsize = AtomicUsize::new(0);
            Self {
                id: NEXT_ID.fetch_add(1, Ordering::SeqCst),
                counter: AtomicUsize::new(0),
            }
        }

        fn increment(&self) -> usize {
            self.counter.fetch_add(1, Ordering::SeqCst) + 1
        }
    }

    #[derive(Debug)]
    struct Greeting(String);

    #[test]
    fn test_singleton_arc_sharing() {
        let mut registry = ServiceRegistry::new();
        registry.register_singleton(TestService::new()).unwrap();

        let instance1 = registry.resolve::<TestService>().unwrap();
        let instance2 = registry.resolve::<TestService>().unwrap();

        assert!(Arc::ptr_eq(&instance1, &instance2));
        instance1.increment();
        assert_eq!(instance2.increment(), 2);
        assert_eq!(registry.scope_of::<TestService>(), Some(ServiceScope::Singleton));
    }

    #[test]
    fn test_transient_behavior() {
        let mut registry = ServiceRegistry::new();
        registry.register_transient(|_| Ok(TestService::new())).unwrap();

        let instance1 = registry.resolve::<TestService>().unwrap();
        let instance2 = registry.resolve::<TestService>().unwrap();

        assert_ne!(instance1.id, instance2.id);
        assert!(!Arc::ptr_eq(&instance1, &instance2));
        assert_eq!(registry.scope_of::<TestService>(), Some(ServiceScope::Transient));
    }

    #[test]
    fn test_factory_resolves_dependencies() {
        let mut registry = ServiceRegistry::new();
        registry.register_singleton(String::from("world")).unwrap();
        registry
            .register_transient(|registry| {
                let name = registry.resolve::<String>()?;
                Ok(Greeting(format!("hello {}", name)))
            })
            .unwrap();

        assert_eq!(registry.resolve::<Greeting>().unwrap().0, "hello world");
    }

    #[test]
    fn test_factory_error_propagates() {
        let mut registry = ServiceRegistry::new();
        registry
            .register_transient(|registry| registry.resolve::<String>().map(|s| Greeting(s.to_string())))
            .unwrap();

        assert!(registry.resolve::<Greeting>().unwrap_err().is_service());
    }

    #[test]
    fn test_clones_share_bindings() {
        let mut registry = ServiceRegistry::new();
        let view = registry.clone();
        registry.register_singleton(42u32).unwrap();

        assert!(view.contains::<u32>());
        assert_eq!(*view.resolve::<u32>().unwrap(), 42);
    }

    #[test]
    fn test_service_registry_operations() {
        let mut registry = ServiceRegistry::new();
        assert!(!registry.contains::<TestService>());
        assert_eq!(registry.service_count(), 0);
        assert!(registry.resolve::<TestService>().is_err());

        registry.register_singleton(TestService::new()).unwrap();
        registry.register_singleton(7u8).unwrap();
        registry.register_singleton(8u8).unwrap();

        assert!(registry.contains::<TestService>());
        assert_eq!(registry.service_count(), 2);
        assert_eq!(*registry.resolve::<u8>().unwrap(), 8);
        assert!(registry.registered_services().contains(&"u8"));
    }
}

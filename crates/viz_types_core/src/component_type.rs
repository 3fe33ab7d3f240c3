use arrow::datatypes::DataType;
use nohash_hasher::IntMap;
use parking_lot::RwLock;

use crate::{ComponentDescriptor, SerializationError, SerializationResult};

// ---

/// An opaque handle identifying a registered component type.
///
/// Returned once per unique [`ComponentDescriptor`] for the lifetime of the
/// registry; there is no deregistration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentTypeHandle(pub u32);

impl std::fmt::Display for ComponentTypeHandle {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The external registration call failed.
#[derive(thiserror::Error, Debug, Clone)]
#[error("{reason}")]
pub struct RegistrationError {
    pub reason: String,
}

impl RegistrationError {
    #[inline]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The transport-side boundary that actually registers component types.
///
/// The registry guarantees this is called at most once per distinct descriptor
/// per registry, but the call itself need not be idempotent.
pub trait ComponentTypeRegistrar: Send + Sync {
    fn register_component_type(
        &self,
        descriptor: &ComponentDescriptor,
        datatype: &DataType,
    ) -> Result<ComponentTypeHandle, RegistrationError>;
}

// ---

/// A thread-safe, lazily filled cache mapping component descriptors to their
/// registered [`ComponentTypeHandle`]s.
///
/// Explicitly constructed and explicitly owned (typically by the recording
/// stream) rather than a process-wide static, so that tests can spin up as
/// many independent registries as they like.
///
/// Lookups of already-registered descriptors take a read lock and never block
/// each other; only the rare first-time registration path is serialized.
#[derive(Default)]
pub struct ComponentTypeRegistry {
    handles: RwLock<IntMap<u64, ComponentTypeHandle>>,
}

impl ComponentTypeRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct component types registered so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.handles.read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handles.read().is_empty()
    }

    /// Returns the handle for the given descriptor, registering it through
    /// `registrar` on first sight.
    ///
    /// Any number of threads may race on the same descriptor: the registration
    /// call reaches the registrar exactly once, and every caller receives the
    /// same handle.
    ///
    /// A failed registration is not cached: the next call with the same
    /// descriptor retries.
    pub fn get_or_register(
        &self,
        descriptor: &ComponentDescriptor,
        datatype: &DataType,
        registrar: &dyn ComponentTypeRegistrar,
    ) -> SerializationResult<ComponentTypeHandle> {
        descriptor.sanity_check();

        let key = descriptor.hashed();

        if let Some(handle) = self.handles.read().get(&key) {
            return Ok(*handle);
        }

        let mut handles = self.handles.write();

        // Another thread may have registered this descriptor between our read
        // and write locks.
        if let Some(handle) = handles.get(&key) {
            return Ok(*handle);
        }

        let handle = registrar
            .register_component_type(descriptor, datatype)
            .map_err(|err| SerializationError::Registration {
                descriptor: descriptor.to_string(),
                reason: err.to_string(),
            })?;

        handles.insert(key, handle);

        Ok(handle)
    }
}

// ---

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    /// Hands out sequential handles, counting (and optionally failing)
    /// registration calls.
    #[derive(Default)]
    struct CountingRegistrar {
        num_calls: AtomicU32,
        fail_first: bool,
    }

    impl ComponentTypeRegistrar for CountingRegistrar {
        fn register_component_type(
            &self,
            _descriptor: &ComponentDescriptor,
            _datatype: &DataType,
        ) -> Result<ComponentTypeHandle, RegistrationError> {
            let call = self.num_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_first && call == 0 {
                return Err(RegistrationError::new("transport unavailable"));
            }
            Ok(ComponentTypeHandle(call))
        }
    }

    fn radius_descriptor() -> ComponentDescriptor {
        ComponentDescriptor::new("viz.components.Radius")
    }

    #[test]
    fn registration_is_idempotent() {
        let registry = ComponentTypeRegistry::new();
        let registrar = CountingRegistrar::default();
        let descriptor = radius_descriptor();

        let first = registry
            .get_or_register(&descriptor, &DataType::Float32, &registrar)
            .unwrap();
        for _ in 0..100 {
            let handle = registry
                .get_or_register(&descriptor, &DataType::Float32, &registrar)
                .unwrap();
            assert_eq!(handle, first);
        }

        assert_eq!(registrar.num_calls.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn concurrent_racers_register_once() {
        let registry = ComponentTypeRegistry::new();
        let registrar = CountingRegistrar::default();
        let descriptor = radius_descriptor();

        let handles: Vec<ComponentTypeHandle> = std::thread::scope(|scope| {
            let threads: Vec<_> = (0..16)
                .map(|_| {
                    scope.spawn(|| {
                        registry
                            .get_or_register(&descriptor, &DataType::Float32, &registrar)
                            .unwrap()
                    })
                })
                .collect();
            threads.into_iter().map(|t| t.join().unwrap()).collect()
        });

        // Exactly one registration call, and every thread got the same handle.
        assert_eq!(registrar.num_calls.load(Ordering::SeqCst), 1);
        assert!(handles.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn failed_registration_is_not_cached() {
        let registry = ComponentTypeRegistry::new();
        let registrar = CountingRegistrar {
            num_calls: AtomicU32::new(0),
            fail_first: true,
        };
        let descriptor = radius_descriptor();

        let err = registry
            .get_or_register(&descriptor, &DataType::Float32, &registrar)
            .unwrap_err();
        assert!(matches!(err, SerializationError::Registration { .. }));
        assert!(registry.is_empty());

        // The retry goes through and gets cached.
        let handle = registry
            .get_or_register(&descriptor, &DataType::Float32, &registrar)
            .unwrap();
        assert_eq!(handle, ComponentTypeHandle(1));
        assert_eq!(registry.len(), 1);
        assert_eq!(registrar.num_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn distinct_descriptors_get_distinct_handles() {
        let registry = ComponentTypeRegistry::new();
        let registrar = CountingRegistrar::default();

        let freestanding = radius_descriptor();
        let tagged = radius_descriptor().with_archetype("viz.archetypes.Points3D", "radii");

        let a = registry
            .get_or_register(&freestanding, &DataType::Float32, &registrar)
            .unwrap();
        let b = registry
            .get_or_register(&tagged, &DataType::Float32, &registrar)
            .unwrap();

        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }
}

//! One shared instance per handler type.
//!
//! # Responsibilities
//! - Construct a handler type on first request
//! - Hand out the cached instance afterwards
//!
//! # Design Decisions
//! - Keyed by `TypeId`; no reflection, construction goes through [`Singleton`]
//! - Construction runs outside the map lock so constructors may resolve other
//!   singletons; a construction race is settled first-writer-wins and the
//!   losing instance is dropped before anyone observes it
//! - Construction failures propagate and leave the cache untouched

use std::any::{Any, TypeId};
use std::sync::Arc;

use dashmap::DashMap;

use crate::error::{BoxError, RegistryError, RegistryResult};

/// Zero-argument construction for types resolved through [`SingletonResolver`].
pub trait Singleton: Sized + Send + Sync + 'static {
    fn construct() -> Result<Self, BoxError>;
}

/// Process-wide instance cache.
#[derive(Default)]
pub struct SingletonResolver {
    instances: DashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl SingletonResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The one instance of `T`, constructing it on first use.
    pub fn get_instance<T: Singleton>(&self) -> RegistryResult<Arc<T>> {
        let id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        let cached = self.instances.get(&id).map(|entry| Arc::clone(entry.value()));
        if let Some(existing) = cached {
            return downcast(existing, type_name);
        }

        let created = T::construct().map_err(|source| RegistryError::Construction {
            type_name,
            source,
        })?;
        let created: Arc<dyn Any + Send + Sync> = Arc::new(created);

        let winner = Arc::clone(
            self.instances
                .entry(id)
                .or_insert_with(|| Arc::clone(&created))
                .value(),
        );
        if Arc::ptr_eq(&winner, &created) {
            tracing::debug!(singleton = type_name, "Constructed singleton");
        } else {
            tracing::debug!(singleton = type_name, "Lost construction race, using cached instance");
        }
        downcast(winner, type_name)
    }

    /// True once an instance of `T` has been constructed.
    pub fn contains<T: Singleton>(&self) -> bool {
        self.instances.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

fn downcast<T: Singleton>(
    instance: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
) -> RegistryResult<Arc<T>> {
    instance
        .downcast::<T>()
        .map_err(|_| RegistryError::InstanceType(type_name))
}

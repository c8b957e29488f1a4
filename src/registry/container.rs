/*!
 * Service Container
 * Factory-backed provider registry with shared instances
 */

use ahash::RandomState;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::traits::{Provider, RegistryError, RegistryResult, Resolver};
use crate::encoding::Encoder;
use crate::normalization::Normalizer;

/// Builds a provider; receives the container to resolve its own dependencies
pub type ProviderFactory = Arc<dyn Fn(&ServiceContainer) -> RegistryResult<Provider> + Send + Sync>;

/// Provider registry with lazily invoked factories
///
/// Each factory runs at most once per successful construction; the result is
/// shared by every later `get` for the same key. Factories run without any
/// internal lock held.
pub struct ServiceContainer {
    factories: DashMap<String, ProviderFactory, RandomState>,
    instances: RwLock<HashMap<String, Provider, RandomState>>,
}

impl ServiceContainer {
    pub fn new() -> Self {
        Self {
            factories: DashMap::with_hasher(RandomState::new()),
            instances: RwLock::new(HashMap::with_hasher(RandomState::new())),
        }
    }

    /// Register a factory, dropping any instance built from a previous one
    pub fn register_factory<F>(&self, key: impl Into<String>, factory: F)
    where
        F: Fn(&ServiceContainer) -> RegistryResult<Provider> + Send + Sync + 'static,
    {
        let key = key.into();
        self.instances.write().remove(&key);
        self.factories.insert(key, Arc::new(factory));
    }

    /// Register an encoder factory
    pub fn register_encoder<E, F>(&self, key: impl Into<String>, factory: F)
    where
        E: Encoder + 'static,
        F: Fn() -> E + Send + Sync + 'static,
    {
        self.register_factory(key, move |_| Ok(Provider::Encoder(Arc::new(factory()))));
    }

    /// Register a normalizer factory
    pub fn register_normalizer<N, F>(&self, key: impl Into<String>, factory: F)
    where
        N: Normalizer + 'static,
        F: Fn() -> N + Send + Sync + 'static,
    {
        self.register_factory(key, move |_| {
            Ok(Provider::Normalizer(Arc::new(factory())))
        });
    }

    /// Register an already-built provider
    pub fn register_instance(&self, key: impl Into<String>, provider: Provider) {
        self.instances.write().insert(key.into(), provider);
    }

    /// Forget a key entirely; `has` reports false afterwards
    pub fn remove(&self, key: &str) -> bool {
        let had_factory = self.factories.remove(key).is_some();
        let had_instance = self.instances.write().remove(key).is_some();
        had_factory || had_instance
    }

    /// True once the provider for `key` has been built (or registered directly)
    pub fn is_instantiated(&self, key: &str) -> bool {
        self.instances.read().contains_key(key)
    }

    /// Number of registered keys
    pub fn len(&self) -> usize {
        let instances = self.instances.read();
        let factory_only = self
            .factories
            .iter()
            .filter(|entry| !instances.contains_key(entry.key()))
            .count();
        instances.len() + factory_only
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for ServiceContainer {
    fn has(&self, key: &str) -> bool {
        self.instances.read().contains_key(key) || self.factories.contains_key(key)
    }

    fn get(&self, key: &str) -> RegistryResult<Provider> {
        if let Some(provider) = self.instances.read().get(key) {
            return Ok(provider.clone());
        }

        let factory = self
            .factories
            .get(key)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| RegistryError::NotFound(key.to_string()))?;

        let provider = factory(self)?;
        debug!(key, kind = %provider.kind(), "Constructed provider");

        // Another caller may have won the race; keep the first instance
        let mut instances = self.instances.write();
        Ok(instances
            .entry(key.to_string())
            .or_insert(provider)
            .clone())
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("factories", &self.factories.len())
            .field("instances", &self.instances.read().len())
            .finish()
    }
}

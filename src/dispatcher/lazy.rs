/*!
 * Lazy Dispatcher
 *
 * Serialization facade that pulls encoders and normalizers out of a
 * registry the first time their format or class is requested.
 *
 * # Resolution policy
 *
 * - Encoders are resolved *before* encode/decode/get_encoder, because the
 *   encoder lookup is a direct keyed lookup with nothing to try first. An
 *   already registered encoder is never replaced.
 * - Normalizers are resolved *after* the chain fails. On success the
 *   operation is retried exactly once; otherwise the chain's original error
 *   is returned unchanged.
 * - Failed resolutions are not remembered; the next call looks again.
 * - A normalizer key is loaded at most once. Later failures for its class
 *   return the chain's error without asking the registry again.
 */

use ahash::RandomState;
use bytes::Bytes;
use std::collections::HashSet;
use std::sync::{Arc, Weak};
use tracing::{debug, instrument, trace, warn};

use super::config::ProviderMaps;
use super::resolution::{Resolution, ResolutionMiss};
use crate::core::{
    downcast_object, type_key, ClassProviderMap, FormatProviderMap, Object, Representation,
    SerializerResult,
};
use crate::encoding::{Encoder, EncoderTable};
use crate::normalization::{Normalizer, NormalizerChain};
use crate::registry::{Provider, ProviderKind, Resolver};

/// Encoder table and normalizer chain with on-demand provider loading
///
/// Lazy loading only ever adds providers. Without a live registry the
/// dispatcher behaves exactly like the base table and chain.
pub struct LazyDispatcher {
    encoders: EncoderTable,
    normalizers: NormalizerChain,
    format_providers: FormatProviderMap,
    class_providers: ClassProviderMap,
    registry: Option<Weak<dyn Resolver>>,
    loaded_normalizers: HashSet<String, RandomState>,
}

impl LazyDispatcher {
    /// Create a dispatcher from optional provider maps
    pub fn new(
        format_providers: Option<FormatProviderMap>,
        class_providers: Option<ClassProviderMap>,
    ) -> Self {
        Self {
            encoders: EncoderTable::new(),
            normalizers: NormalizerChain::new(),
            format_providers: format_providers.unwrap_or_default(),
            class_providers: class_providers.unwrap_or_default(),
            registry: None,
            loaded_normalizers: HashSet::with_hasher(RandomState::new()),
        }
    }

    pub fn from_config(maps: ProviderMaps) -> Self {
        Self::new(Some(maps.encoders), Some(maps.normalizers))
    }

    /// Start from an existing set of explicitly configured encoders
    pub fn with_encoders(mut self, encoders: EncoderTable) -> Self {
        self.encoders = encoders;
        self
    }

    /// Start from an existing normalizer chain
    pub fn with_normalizers(mut self, normalizers: NormalizerChain) -> Self {
        self.normalizers = normalizers;
        self
    }

    // ========================================================================
    // Registry
    // ========================================================================

    /// Attach the registry used for lazy loading
    ///
    /// Only a weak reference is kept; once the owner drops the registry,
    /// lazy loading is disabled.
    pub fn set_registry<R: Resolver + 'static>(&mut self, registry: &Arc<R>) {
        let weak: Weak<R> = Arc::downgrade(registry);
        self.registry = Some(weak);
    }

    /// Attach a registry already erased to `dyn Resolver`
    pub fn set_shared_registry(&mut self, registry: &Arc<dyn Resolver>) {
        self.registry = Some(Arc::downgrade(registry));
    }

    /// Disable lazy loading
    pub fn clear_registry(&mut self) {
        self.registry = None;
    }

    /// True while an attached registry is still alive
    pub fn has_registry(&self) -> bool {
        self.live_registry().is_some()
    }

    fn live_registry(&self) -> Option<Arc<dyn Resolver>> {
        self.registry.as_ref().and_then(Weak::upgrade)
    }

    // ========================================================================
    // Base collaborators
    // ========================================================================

    pub fn add_normalizer(&mut self, normalizer: Arc<dyn Normalizer>) {
        self.normalizers.add_normalizer(normalizer);
    }

    pub fn set_encoder(&mut self, format: impl Into<String>, encoder: Arc<dyn Encoder>) {
        self.encoders.set_encoder(format, encoder);
    }

    pub fn has_encoder(&self, format: &str) -> bool {
        self.encoders.has_encoder(format)
    }

    pub fn encoders(&self) -> &EncoderTable {
        &self.encoders
    }

    pub fn normalizers(&self) -> &NormalizerChain {
        &self.normalizers
    }

    pub fn format_providers(&self) -> &FormatProviderMap {
        &self.format_providers
    }

    pub fn class_providers(&self) -> &ClassProviderMap {
        &self.class_providers
    }

    // ========================================================================
    // Normalization
    // ========================================================================

    /// Normalize an object, loading a normalizer for its class on failure
    pub fn normalize_object(
        &mut self,
        object: &dyn Object,
        format: &str,
        properties: Option<&[String]>,
    ) -> SerializerResult<Representation> {
        let original = match self.normalizers.normalize_object(object, format, properties) {
            Ok(representation) => return Ok(representation),
            Err(e) => e,
        };

        let class = object.class_name();
        if let Err(miss) = self.lazy_load_normalizer(class) {
            note_miss(class, &miss);
            return Err(original);
        }

        let retried = self.normalizers.normalize_object(object, format, properties);
        if let Err(e) = &retried {
            warn!(class, error = %e, "Normalization still failing after lazy load");
        }
        retried
    }

    /// Denormalize into `class`, loading a normalizer for it on failure
    pub fn denormalize_object(
        &mut self,
        data: &Representation,
        class: &str,
        format: Option<&str>,
    ) -> SerializerResult<Box<dyn Object>> {
        let original = match self.normalizers.denormalize_object(data, class, format) {
            Ok(object) => return Ok(object),
            Err(e) => e,
        };

        if let Err(miss) = self.lazy_load_normalizer(class) {
            note_miss(class, &miss);
            return Err(original);
        }

        let retried = self.normalizers.denormalize_object(data, class, format);
        if let Err(e) = &retried {
            warn!(class, error = %e, "Denormalization still failing after lazy load");
        }
        retried
    }

    /// Typed variant of [`denormalize_object`](Self::denormalize_object)
    pub fn denormalize<T: Object>(
        &mut self,
        data: &Representation,
        format: Option<&str>,
    ) -> SerializerResult<T> {
        let object = self.denormalize_object(data, type_key::<T>(), format)?;
        downcast_object::<T>(object)
    }

    // ========================================================================
    // Encoding
    // ========================================================================

    pub fn encode(&mut self, data: &Representation, format: &str) -> SerializerResult<Bytes> {
        self.prepare_encoder(format);
        self.encoders.encode(data, format)
    }

    pub fn decode(&mut self, data: &[u8], format: &str) -> SerializerResult<Representation> {
        self.prepare_encoder(format);
        self.encoders.decode(data, format)
    }

    pub fn get_encoder(&mut self, format: &str) -> SerializerResult<Arc<dyn Encoder>> {
        self.prepare_encoder(format);
        self.encoders.get_encoder(format)
    }

    // ========================================================================
    // Full round trip
    // ========================================================================

    /// Normalize then encode
    pub fn serialize(&mut self, object: &dyn Object, format: &str) -> SerializerResult<Bytes> {
        let representation = self.normalize_object(object, format, None)?;
        self.encode(&representation, format)
    }

    /// Decode then denormalize into `T`
    pub fn deserialize<T: Object>(&mut self, data: &[u8], format: &str) -> SerializerResult<T> {
        let representation = self.decode(data, format)?;
        self.denormalize::<T>(&representation, Some(format))
    }

    // ========================================================================
    // Lazy resolution
    // ========================================================================

    fn prepare_encoder(&mut self, format: &str) {
        if let Err(miss) = self.lazy_load_encoder(format) {
            note_miss(format, &miss);
        }
    }

    #[instrument(level = "trace", skip(self))]
    fn lazy_load_encoder(&mut self, format: &str) -> Result<Resolution, ResolutionMiss> {
        if self.encoders.has_encoder(format) {
            return Ok(Resolution::AlreadyRegistered);
        }

        let key = self
            .format_providers
            .get(format)
            .ok_or_else(|| ResolutionMiss::NoProviderMapped(format.to_string()))?;

        match self.fetch(key)? {
            Provider::Encoder(encoder) => {
                debug!(format, key = %key, encoder = encoder.name(), "Lazily loaded encoder");
                self.encoders.set_encoder(format, encoder);
                Ok(Resolution::Loaded)
            }
            Provider::Normalizer(_) => Err(ResolutionMiss::ProviderKindMismatch {
                key: key.clone(),
                expected: ProviderKind::Encoder,
            }),
        }
    }

    #[instrument(level = "trace", skip(self))]
    fn lazy_load_normalizer(&mut self, class: &str) -> Result<Resolution, ResolutionMiss> {
        let key = self
            .class_providers
            .get(class)
            .ok_or_else(|| ResolutionMiss::NoProviderMapped(class.to_string()))?;

        if self.loaded_normalizers.contains(key) {
            return Err(ResolutionMiss::AlreadyLoaded(key.clone()));
        }

        match self.fetch(key)? {
            Provider::Normalizer(normalizer) => {
                debug!(class, key = %key, normalizer = normalizer.name(), "Lazily loaded normalizer");
                self.loaded_normalizers.insert(key.clone());
                self.normalizers.add_normalizer(normalizer);
                Ok(Resolution::Loaded)
            }
            Provider::Encoder(_) => Err(ResolutionMiss::ProviderKindMismatch {
                key: key.clone(),
                expected: ProviderKind::Normalizer,
            }),
        }
    }

    fn fetch(&self, key: &str) -> Result<Provider, ResolutionMiss> {
        let registry = self.live_registry().ok_or(ResolutionMiss::RegistryDetached)?;

        if !registry.has(key) {
            return Err(ResolutionMiss::ProviderUnavailable(key.to_string()));
        }

        registry
            .get(key)
            .map_err(|source| ResolutionMiss::RegistryFailure {
                key: key.to_string(),
                source,
            })
    }
}

fn note_miss(subject: &str, miss: &ResolutionMiss) {
    if miss.is_misconfiguration() {
        let source = std::error::Error::source(miss).map(ToString::to_string);
        warn!(subject, reason = %miss, source = ?source, "Lazy resolution failed");
    } else {
        trace!(subject, reason = %miss, "Lazy resolution skipped");
    }
}

impl Default for LazyDispatcher {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl std::fmt::Debug for LazyDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyDispatcher")
            .field("encoders", &self.encoders)
            .field("normalizers", &self.normalizers)
            .field("format_providers", &self.format_providers)
            .field("class_providers", &self.class_providers)
            .field("loaded_normalizers", &self.loaded_normalizers.len())
            .field("registry_attached", &self.has_registry())
            .finish()
    }
}

/*!
 * Normalizer Chain
 * Ordered, first-match normalizer dispatch with a per-class lookup cache
 */

use ahash::RandomState;
use std::collections::HashMap;
use std::sync::Arc;

use super::traits::Normalizer;
use crate::core::{Object, Representation, SerializerError, SerializerResult};

type NormalizeKey = (String, String);
type DenormalizeKey = (String, Option<String>);

/// Ordered collection of normalizers
///
/// Lookup is first-match over registration order. Matches are cached per
/// (class, format); normalizers are only ever appended, so a cached index
/// stays valid and keeps pointing at the first match.
#[derive(Clone, Default)]
pub struct NormalizerChain {
    normalizers: Vec<Arc<dyn Normalizer>>,
    normalizer_cache: HashMap<NormalizeKey, usize, RandomState>,
    denormalizer_cache: HashMap<DenormalizeKey, usize, RandomState>,
}

impl NormalizerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a normalizer; it is checked after every existing one
    pub fn add_normalizer(&mut self, normalizer: Arc<dyn Normalizer>) {
        self.normalizers.push(normalizer);
    }

    /// Builder-style registration
    pub fn with_normalizer(mut self, normalizer: Arc<dyn Normalizer>) -> Self {
        self.add_normalizer(normalizer);
        self
    }

    pub fn normalize_object(
        &mut self,
        object: &dyn Object,
        format: &str,
        properties: Option<&[String]>,
    ) -> SerializerResult<Representation> {
        if self.normalizers.is_empty() {
            return Err(SerializerError::NoNormalizers);
        }

        let class = object.class_name();
        let key = (class.to_string(), format.to_string());
        if let Some(&index) = self.normalizer_cache.get(&key) {
            return self.normalizers[index].normalize(object, format, properties);
        }

        let found = self
            .normalizers
            .iter()
            .position(|normalizer| normalizer.supports_normalization(object, format));

        match found {
            Some(index) => {
                self.normalizer_cache.insert(key, index);
                self.normalizers[index].normalize(object, format, properties)
            }
            None => Err(SerializerError::UnsupportedNormalization {
                class: class.to_string(),
            }),
        }
    }

    pub fn denormalize_object(
        &mut self,
        data: &Representation,
        class: &str,
        format: Option<&str>,
    ) -> SerializerResult<Box<dyn Object>> {
        if self.normalizers.is_empty() {
            return Err(SerializerError::NoNormalizers);
        }

        let key = (class.to_string(), format.map(str::to_string));
        if let Some(&index) = self.denormalizer_cache.get(&key) {
            return self.normalizers[index].denormalize(data, class, format);
        }

        let found = self
            .normalizers
            .iter()
            .position(|normalizer| normalizer.supports_denormalization(data, class, format));

        match found {
            Some(index) => {
                self.denormalizer_cache.insert(key, index);
                self.normalizers[index].denormalize(data, class, format)
            }
            None => Err(SerializerError::UnsupportedDenormalization {
                class: class.to_string(),
            }),
        }
    }

    /// Normalizer names in lookup order
    pub fn names(&self) -> Vec<&str> {
        self.normalizers.iter().map(|n| n.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.normalizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalizers.is_empty()
    }
}

impl std::fmt::Debug for NormalizerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NormalizerChain")
            .field("normalizers", &self.names())
            .field("cached_classes", &self.normalizer_cache.len())
            .finish()
    }
}

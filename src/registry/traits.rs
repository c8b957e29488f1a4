/*!
 * Registry Traits
 * Key-based provider resolution consumed by the lazy dispatcher
 */

use miette::Diagnostic;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::encoding::Encoder;
use crate::normalization::Normalizer;

/// Result type for registry lookups
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("No provider registered under \"{0}\"")]
    #[diagnostic(code(registry::not_found))]
    NotFound(String),

    #[error("Provider \"{key}\" could not be constructed: {reason}")]
    #[diagnostic(
        code(registry::construction_failed),
        help("The provider factory failed. Check its dependencies.")
    )]
    ConstructionFailed { key: String, reason: String },
}

/// Which capability a provider offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Encoder,
    Normalizer,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoder => f.write_str("encoder"),
            Self::Normalizer => f.write_str("normalizer"),
        }
    }
}

/// A live encoder or normalizer produced by a registry
#[derive(Clone)]
pub enum Provider {
    Encoder(Arc<dyn Encoder>),
    Normalizer(Arc<dyn Normalizer>),
}

impl Provider {
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Encoder(_) => ProviderKind::Encoder,
            Self::Normalizer(_) => ProviderKind::Normalizer,
        }
    }

    pub fn into_encoder(self) -> Option<Arc<dyn Encoder>> {
        match self {
            Self::Encoder(encoder) => Some(encoder),
            Self::Normalizer(_) => None,
        }
    }

    pub fn into_normalizer(self) -> Option<Arc<dyn Normalizer>> {
        match self {
            Self::Normalizer(normalizer) => Some(normalizer),
            Self::Encoder(_) => None,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Encoder(encoder) => encoder.name(),
            Self::Normalizer(normalizer) => normalizer.name(),
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

/// Resolves provider keys to live providers
///
/// `get` is only called after `has` returned true for the same key, but
/// implementations may still fail (e.g. a factory error).
pub trait Resolver: Send + Sync {
    /// True iff a provider for `key` can currently be produced
    fn has(&self, key: &str) -> bool;

    /// Produce (or return a cached) provider for `key`
    fn get(&self, key: &str) -> RegistryResult<Provider>;
}

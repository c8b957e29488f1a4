/*!
 * Lazy Resolution Outcomes
 * Internal results of a provider lookup; never surfaced to callers
 */

use thiserror::Error;

use crate::registry::{ProviderKind, RegistryError};

/// Successful resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Encoder already registered, nothing to do
    AlreadyRegistered,
    /// Provider fetched from the registry and registered
    Loaded,
}

/// Why lazy resolution could not help
#[derive(Error, Debug)]
pub(crate) enum ResolutionMiss {
    #[error("no provider key mapped for \"{0}\"")]
    NoProviderMapped(String),

    #[error("no registry attached")]
    RegistryDetached,

    #[error("provider \"{0}\" was already loaded")]
    AlreadyLoaded(String),

    #[error("registry cannot currently provide \"{0}\"")]
    ProviderUnavailable(String),

    #[error("registry failed to produce \"{key}\"")]
    RegistryFailure {
        key: String,
        #[source]
        source: RegistryError,
    },

    #[error("provider \"{key}\" is not a {expected}")]
    ProviderKindMismatch { key: String, expected: ProviderKind },
}

impl ResolutionMiss {
    /// Misses that point at a misconfigured registry rather than an unmapped key
    pub(crate) fn is_misconfiguration(&self) -> bool {
        matches!(
            self,
            Self::RegistryFailure { .. } | Self::ProviderKindMismatch { .. }
        )
    }
}

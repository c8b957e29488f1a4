/*!
 * Provider Map Configuration
 *
 * Format and class maps that drive lazy loading, loadable from JSON.
 *
 * ```json
 * {
 *   "encoders": { "xml": "svc.xml_encoder" },
 *   "normalizers": { "app::billing::Invoice": "svc.invoice_normalizer" }
 * }
 * ```
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::json::{self, JsonError};
use crate::core::{ClassProviderMap, FormatProviderMap};

/// Environment variable naming a JSON provider map file
pub const PROVIDER_MAP_ENV: &str = "SERIALIZER_PROVIDER_MAP";

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading errors
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read provider map {path}")]
    #[diagnostic(
        code(config::io),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid provider map: {0}")]
    #[diagnostic(
        code(config::parse),
        help("Expected an object with optional \"encoders\" and \"normalizers\" maps.")
    )]
    Parse(#[from] JsonError),
}

/// Lazy-loading maps, immutable once handed to a dispatcher
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderMaps {
    /// Format identifier -> provider key
    pub encoders: FormatProviderMap,
    /// Type identifier -> provider key
    pub normalizers: ClassProviderMap,
}

impl ProviderMaps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoder(mut self, format: impl Into<String>, key: impl Into<String>) -> Self {
        self.encoders.insert(format.into(), key.into());
        self
    }

    pub fn with_normalizer(mut self, class: impl Into<String>, key: impl Into<String>) -> Self {
        self.normalizers.insert(class.into(), key.into());
        self
    }

    pub fn from_json_slice(bytes: &[u8]) -> ConfigResult<Self> {
        Ok(json::from_slice(bytes)?)
    }

    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        Self::from_json_slice(s.as_bytes())
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_slice(&bytes)
    }

    /// Load the file named by `SERIALIZER_PROVIDER_MAP`, if set
    pub fn from_env() -> ConfigResult<Option<Self>> {
        match std::env::var_os(PROVIDER_MAP_ENV) {
            Some(path) => Self::from_file(PathBuf::from(path)).map(Some),
            None => Ok(None),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty() && self.normalizers.is_empty()
    }
}

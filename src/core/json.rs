/*!
 * JSON Helpers
 * serde_json encoding with adaptive SIMD decoding
 *
 * # Features
 * - Standard serde_json path for small payloads
 * - simd-json path above a configurable threshold
 * - Strongly-typed errors with context
 */

use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::OnceLock;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Default SIMD threshold (1KB)
const DEFAULT_SIMD_THRESHOLD: usize = 1024;

/// Compile-time threshold used with the `custom_limits` feature
#[cfg(feature = "custom_limits")]
const CUSTOM_SIMD_THRESHOLD: usize = 4096;

/// Environment override for the SIMD threshold
pub const SIMD_THRESHOLD_ENV: &str = "SERIALIZER_JSON_SIMD_THRESHOLD";

static SIMD_THRESHOLD: OnceLock<usize> = OnceLock::new();

#[inline]
fn simd_threshold() -> usize {
    *SIMD_THRESHOLD.get_or_init(|| {
        #[cfg(feature = "custom_limits")]
        {
            return CUSTOM_SIMD_THRESHOLD;
        }

        #[cfg(not(feature = "custom_limits"))]
        {
            std::env::var(SIMD_THRESHOLD_ENV)
                .ok()
                .and_then(|value| value.parse::<usize>().ok())
                .unwrap_or(DEFAULT_SIMD_THRESHOLD)
        }
    })
}

// ============================================================================
// Error Types
// ============================================================================

/// Result type for JSON operations
pub type JsonResult<T> = Result<T, JsonError>;

/// JSON operation errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum JsonError {
    #[error("Serialization failed: {context}")]
    Serialization {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Deserialization failed: {context}")]
    Deserialization {
        context: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl JsonError {
    /// Message including the underlying parser error
    pub fn detail(&self) -> String {
        match self {
            Self::Serialization { context, source } => format!("{context}: {source}"),
            Self::Deserialization { context, source } => format!("{context}: {source}"),
        }
    }
}

// ============================================================================
// Serialization
// ============================================================================

#[inline]
pub fn to_vec<T: Serialize>(value: &T) -> JsonResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|source| JsonError::Serialization {
        context: "standard serialization",
        source,
    })
}

/// Pretty-printed variant, mostly for debugging output
#[inline]
pub fn to_vec_pretty<T: Serialize>(value: &T) -> JsonResult<Vec<u8>> {
    serde_json::to_vec_pretty(value).map_err(|source| JsonError::Serialization {
        context: "pretty-print serialization",
        source,
    })
}

/// Serialize straight into `Bytes`
#[inline]
pub fn to_bytes<T: Serialize>(value: &T) -> JsonResult<Bytes> {
    to_vec(value).map(Bytes::from)
}

// ============================================================================
// Deserialization (Adaptive SIMD)
// ============================================================================

/// Deserialize JSON bytes, switching to simd-json above the threshold
#[inline]
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> JsonResult<T> {
    if bytes.len() > simd_threshold() {
        from_slice_simd(bytes)
    } else {
        from_slice_std(bytes)
    }
}

#[inline]
pub fn from_slice_simd<T: DeserializeOwned>(bytes: &[u8]) -> JsonResult<T> {
    // simd-json parses in place
    let mut owned = bytes.to_vec();
    simd_json::from_slice(&mut owned).map_err(|e| JsonError::Deserialization {
        context: "SIMD deserialization",
        source: Box::new(e),
    })
}

#[inline]
pub fn from_slice_std<T: DeserializeOwned>(bytes: &[u8]) -> JsonResult<T> {
    serde_json::from_slice(bytes).map_err(|source| JsonError::Deserialization {
        context: "standard deserialization",
        source: Box::new(source),
    })
}

#[inline]
pub fn from_str<T: DeserializeOwned>(s: &str) -> JsonResult<T> {
    from_slice(s.as_bytes())
}

/// Check if a payload would take the SIMD path
#[inline]
pub fn would_use_simd(size: usize) -> bool {
    size > simd_threshold()
}

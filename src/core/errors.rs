/*!
 * Error Types
 * Errors raised by the base encoder table and normalizer chain
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for serializer operations
pub type SerializerResult<T> = Result<T, SerializerError>;

/// Serializer errors with serialization support
///
/// These are the only errors callers of the dispatcher ever observe. Lazy
/// resolution failures are swallowed and the base error is returned as-is,
/// so every variant must compare equal across identical failures.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
#[non_exhaustive]
pub enum SerializerError {
    #[error("No encoder found for format \"{0}\"")]
    #[diagnostic(
        code(serializer::unsupported_format),
        help("Register an encoder for this format or map it to a provider key.")
    )]
    UnsupportedFormat(String),

    #[error("You must register at least one normalizer to be able to normalize objects")]
    #[diagnostic(
        code(serializer::no_normalizers),
        help("Add a normalizer to the chain or map the class to a provider key.")
    )]
    NoNormalizers,

    #[error("Could not normalize object of type {class}, no supporting normalizer found")]
    #[diagnostic(code(serializer::unsupported_normalization))]
    UnsupportedNormalization { class: String },

    #[error("Could not denormalize object of type {class}, no supporting normalizer found")]
    #[diagnostic(code(serializer::unsupported_denormalization))]
    UnsupportedDenormalization { class: String },

    #[error("Failed to normalize {class}: {reason}")]
    #[diagnostic(code(serializer::normalization_failed))]
    Normalization { class: String, reason: String },

    #[error("Failed to denormalize {class}: {reason}")]
    #[diagnostic(code(serializer::denormalization_failed))]
    Denormalization { class: String, reason: String },

    #[error("Failed to encode {format} payload: {reason}")]
    #[diagnostic(code(serializer::encoding_failed))]
    Encoding { format: String, reason: String },

    #[error("Failed to decode {format} payload: {reason}")]
    #[diagnostic(
        code(serializer::decoding_failed),
        help("The payload is malformed for this format.")
    )]
    Decoding { format: String, reason: String },

    #[error("Type mismatch: expected {expected}, got {actual}")]
    #[diagnostic(
        code(serializer::type_mismatch),
        help("The normalizer registered for this class produced a different type.")
    )]
    TypeMismatch { expected: String, actual: String },
}

impl SerializerError {
    pub fn normalization(class: impl Into<String>, reason: impl ToString) -> Self {
        Self::Normalization {
            class: class.into(),
            reason: reason.to_string(),
        }
    }

    pub fn denormalization(class: impl Into<String>, reason: impl ToString) -> Self {
        Self::Denormalization {
            class: class.into(),
            reason: reason.to_string(),
        }
    }

    pub fn encoding(format: impl Into<String>, reason: impl ToString) -> Self {
        Self::Encoding {
            format: format.into(),
            reason: reason.to_string(),
        }
    }

    pub fn decoding(format: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decoding {
            format: format.into(),
            reason: reason.to_string(),
        }
    }

}

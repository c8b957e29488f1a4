/*!
 * Encoder Traits
 * Format-level encoding between representations and bytes
 */

use bytes::Bytes;

use crate::core::{Representation, SerializerResult};

/// Encodes representations to a wire format and back
///
/// An encoder is registered per format identifier. The format is passed
/// through so one encoder instance can serve several related formats.
pub trait Encoder: Send + Sync {
    /// Encode a representation into bytes
    fn encode(&self, data: &Representation, format: &str) -> SerializerResult<Bytes>;

    /// Decode bytes into a representation
    fn decode(&self, data: &[u8], format: &str) -> SerializerResult<Representation>;

    /// Get the name of this encoder (for logging/debugging)
    fn name(&self) -> &str;
}

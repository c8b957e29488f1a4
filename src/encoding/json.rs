/*!
 * JSON Encoder
 * serde_json encoding, adaptive SIMD decoding
 */

use bytes::Bytes;

use super::traits::Encoder;
use crate::core::json;
use crate::core::{Representation, SerializerError, SerializerResult};

/// Encoder for the `json` format
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder {
    pretty: bool,
}

impl JsonEncoder {
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Pretty-printed output (debugging)
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, data: &Representation, format: &str) -> SerializerResult<Bytes> {
        let encoded = if self.pretty {
            json::to_vec_pretty(data).map(Bytes::from)
        } else {
            json::to_bytes(data)
        };
        encoded.map_err(|e| SerializerError::encoding(format, e.detail()))
    }

    fn decode(&self, data: &[u8], format: &str) -> SerializerResult<Representation> {
        json::from_slice(data).map_err(|e| SerializerError::decoding(format, e.detail()))
    }

    fn name(&self) -> &str {
        "json"
    }
}

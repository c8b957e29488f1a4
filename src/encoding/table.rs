/*!
 * Encoder Table
 * Format-keyed encoder registration and dispatch
 */

use ahash::RandomState;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;

use super::traits::Encoder;
use crate::core::{Representation, SerializerError, SerializerResult};

/// Registered encoders, at most one per format
#[derive(Clone, Default)]
pub struct EncoderTable {
    encoders: HashMap<String, Arc<dyn Encoder>, RandomState>,
}

impl EncoderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an encoder, replacing any previous one for the format
    pub fn set_encoder(&mut self, format: impl Into<String>, encoder: Arc<dyn Encoder>) {
        self.encoders.insert(format.into(), encoder);
    }

    /// Builder-style registration
    pub fn with_encoder(mut self, format: impl Into<String>, encoder: Arc<dyn Encoder>) -> Self {
        self.set_encoder(format, encoder);
        self
    }

    pub fn has_encoder(&self, format: &str) -> bool {
        self.encoders.contains_key(format)
    }

    /// Look up the encoder for a format
    pub fn get_encoder(&self, format: &str) -> SerializerResult<Arc<dyn Encoder>> {
        self.encoders
            .get(format)
            .cloned()
            .ok_or_else(|| SerializerError::UnsupportedFormat(format.to_string()))
    }

    pub fn encode(&self, data: &Representation, format: &str) -> SerializerResult<Bytes> {
        self.get_encoder(format)?.encode(data, format)
    }

    pub fn decode(&self, data: &[u8], format: &str) -> SerializerResult<Representation> {
        self.get_encoder(format)?.decode(data, format)
    }

    /// Registered formats, in no particular order
    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.encoders.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }
}

impl std::fmt::Debug for EncoderTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (format, encoder) in &self.encoders {
            map.entry(format, &encoder.name());
        }
        map.finish()
    }
}

/*!
 * Shared fixtures for dispatcher tests
 */

use bytes::Bytes;
use lazy_serializer::{
    Encoder, Object, Provider, RegistryResult, Representation, Resolver, SerializerError,
    SerializerResult,
};
use mockall::mock;
use serde::{Deserialize, Serialize};
use serde_json::json;

mock! {
    pub Registry {}

    impl Resolver for Registry {
        fn has(&self, key: &str) -> bool;
        fn get(&self, key: &str) -> RegistryResult<Provider>;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub number: String,
    pub total: u64,
    pub paid: bool,
}

impl Object for Invoice {}

pub fn invoice() -> Invoice {
    Invoice {
        number: "INV-2024-001".to_string(),
        total: 12_500,
        paid: false,
    }
}

/// Minimal stand-in for an XML encoder: wraps the document text
pub struct StubXmlEncoder;

impl Encoder for StubXmlEncoder {
    fn encode(&self, data: &Representation, format: &str) -> SerializerResult<Bytes> {
        match data.get("document").and_then(Representation::as_str) {
            Some(document) => Ok(Bytes::from(document.to_string())),
            None => Err(SerializerError::encoding(format, "missing document")),
        }
    }

    fn decode(&self, data: &[u8], format: &str) -> SerializerResult<Representation> {
        let text = std::str::from_utf8(data).map_err(|e| SerializerError::decoding(format, e))?;
        if !text.starts_with('<') {
            return Err(SerializerError::decoding(format, "not a document"));
        }
        Ok(json!({ "document": text }))
    }

    fn name(&self) -> &str {
        "stub-xml"
    }
}

/*!
 * Lazy encoder resolution
 */

use super::support::{MockRegistry, StubXmlEncoder};
use lazy_serializer::{
    Encoder, EncoderTable, JsonEncoder, LazyDispatcher, Provider, ProviderMaps, RegistryError,
    SerializerError,
};
use mockall::predicate::eq;
use serde_json::json;
use std::sync::Arc;

fn xml_maps() -> ProviderMaps {
    ProviderMaps::new().with_encoder("xml", "svc.xml_encoder")
}

#[test]
fn test_decode_registers_mapped_encoder() {
    let encoder: Arc<dyn Encoder> = Arc::new(StubXmlEncoder);
    let expected = encoder.decode(b"<a/>", "xml").unwrap();

    let mut registry = MockRegistry::new();
    registry
        .expect_has()
        .with(eq("svc.xml_encoder"))
        .times(1)
        .return_const(true);
    let provided = encoder.clone();
    registry
        .expect_get()
        .with(eq("svc.xml_encoder"))
        .times(1)
        .returning(move |_| Ok(Provider::Encoder(provided.clone())));
    let registry = Arc::new(registry);

    let mut dispatcher = LazyDispatcher::from_config(xml_maps());
    dispatcher.set_registry(&registry);

    let decoded = dispatcher.decode(b"<a/>", "xml").unwrap();
    assert_eq!(decoded, expected);
    assert!(dispatcher.has_encoder("xml"));

    let registered = dispatcher.encoders().get_encoder("xml").unwrap();
    assert!(Arc::ptr_eq(&registered, &encoder));
}

#[test]
fn test_registry_consulted_only_once_per_format() {
    let mut registry = MockRegistry::new();
    registry.expect_has().times(1).return_const(true);
    registry
        .expect_get()
        .times(1)
        .returning(|_| Ok(Provider::Encoder(Arc::new(StubXmlEncoder))));
    let registry = Arc::new(registry);

    let mut dispatcher = LazyDispatcher::from_config(xml_maps());
    dispatcher.set_registry(&registry);

    let value = json!({ "document": "<invoice/>" });
    for _ in 0..3 {
        let bytes = dispatcher.encode(&value, "xml").unwrap();
        assert_eq!(&bytes[..], b"<invoice/>");
    }
    dispatcher.decode(b"<invoice/>", "xml").unwrap();
    dispatcher.get_encoder("xml").unwrap();
}

#[test]
fn test_get_encoder_is_idempotent() {
    let mut registry = MockRegistry::new();
    registry.expect_has().return_const(true);
    registry
        .expect_get()
        .times(1)
        .returning(|_| Ok(Provider::Encoder(Arc::new(StubXmlEncoder))));
    let registry = Arc::new(registry);

    let mut dispatcher = LazyDispatcher::from_config(xml_maps());
    dispatcher.set_registry(&registry);

    let first = dispatcher.get_encoder("xml").unwrap();
    let second = dispatcher.get_encoder("xml").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_explicit_encoder_is_never_overwritten() {
    let explicit: Arc<dyn Encoder> = Arc::new(JsonEncoder::new());
    let encoders = EncoderTable::new().with_encoder("json", explicit.clone());

    let mut registry = MockRegistry::new();
    registry.expect_has().never();
    registry.expect_get().never();
    let registry = Arc::new(registry);

    let maps = ProviderMaps::new().with_encoder("json", "svc.other_json");
    let mut dispatcher = LazyDispatcher::from_config(maps).with_encoders(encoders);
    dispatcher.set_registry(&registry);

    let current = dispatcher.get_encoder("json").unwrap();
    assert!(Arc::ptr_eq(&current, &explicit));

    let bytes = dispatcher.encode(&json!([1, 2]), "json").unwrap();
    assert_eq!(&bytes[..], b"[1,2]");
}

#[test]
fn test_unavailable_provider_falls_back_to_base_error() {
    let mut registry = MockRegistry::new();
    registry.expect_has().times(2).return_const(false);
    registry.expect_get().never();
    let registry = Arc::new(registry);

    let mut dispatcher = LazyDispatcher::from_config(xml_maps());
    dispatcher.set_registry(&registry);

    // Nothing is cached after a miss; each call asks again
    for _ in 0..2 {
        let err = dispatcher.decode(b"<a/>", "xml").unwrap_err();
        assert_eq!(err, SerializerError::UnsupportedFormat("xml".to_string()));
    }
    assert!(!dispatcher.has_encoder("xml"));
}

#[test]
fn test_registry_error_falls_back_to_base_error() {
    let mut registry = MockRegistry::new();
    registry.expect_has().return_const(true);
    registry.expect_get().times(1).returning(|key| {
        Err(RegistryError::ConstructionFailed {
            key: key.to_string(),
            reason: "missing dependency".to_string(),
        })
    });
    let registry = Arc::new(registry);

    let mut dispatcher = LazyDispatcher::from_config(xml_maps());
    dispatcher.set_registry(&registry);

    let err = dispatcher.get_encoder("xml").err();
    assert_eq!(err, Some(SerializerError::UnsupportedFormat("xml".to_string())));
    assert!(!dispatcher.has_encoder("xml"));
}

#[test]
fn test_encoding_errors_pass_through() {
    let mut registry = MockRegistry::new();
    registry.expect_has().return_const(true);
    registry
        .expect_get()
        .returning(|_| Ok(Provider::Encoder(Arc::new(StubXmlEncoder))));
    let registry = Arc::new(registry);

    let mut dispatcher = LazyDispatcher::from_config(xml_maps());
    dispatcher.set_registry(&registry);

    let err = dispatcher.decode(b"plain text", "xml").unwrap_err();
    assert_eq!(err, SerializerError::decoding("xml", "not a document"));
}

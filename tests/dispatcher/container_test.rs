/*!
 * End-to-end with the factory-backed service container
 */

use super::support::{invoice, Invoice, StubXmlEncoder};
use lazy_serializer::{
    type_key, JsonEncoder, LazyDispatcher, ProviderMaps, SerdeNormalizer, SerializerError,
    ServiceContainer,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn maps() -> ProviderMaps {
    ProviderMaps::new()
        .with_encoder("json", "svc.json_encoder")
        .with_encoder("xml", "svc.xml_encoder")
        .with_normalizer(type_key::<Invoice>(), "svc.invoice_normalizer")
}

#[test]
fn test_only_requested_providers_are_built() {
    let container = Arc::new(ServiceContainer::new());
    let xml_builds = Arc::new(AtomicUsize::new(0));
    let counter = xml_builds.clone();
    container.register_encoder("svc.json_encoder", JsonEncoder::new);
    container.register_encoder("svc.xml_encoder", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        StubXmlEncoder
    });
    container.register_normalizer("svc.invoice_normalizer", SerdeNormalizer::<Invoice>::new);

    let mut dispatcher = LazyDispatcher::from_config(maps());
    dispatcher.set_registry(&container);

    let bytes = dispatcher.serialize(&invoice(), "json").unwrap();
    let back: Invoice = dispatcher.deserialize(&bytes, "json").unwrap();
    assert_eq!(back, invoice());

    assert!(container.is_instantiated("svc.json_encoder"));
    assert!(container.is_instantiated("svc.invoice_normalizer"));
    assert!(!container.is_instantiated("svc.xml_encoder"));
    assert_eq!(xml_builds.load(Ordering::SeqCst), 0);

    dispatcher.get_encoder("xml").unwrap();
    dispatcher.get_encoder("xml").unwrap();
    assert_eq!(xml_builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_provider_registered_later_is_picked_up() {
    let container = Arc::new(ServiceContainer::new());
    let mut dispatcher = LazyDispatcher::from_config(maps());
    dispatcher.set_registry(&container);

    let err = dispatcher.serialize(&invoice(), "json").unwrap_err();
    assert_eq!(err, SerializerError::NoNormalizers);

    // Failures are not remembered
    container.register_normalizer("svc.invoice_normalizer", SerdeNormalizer::<Invoice>::new);
    container.register_encoder("svc.json_encoder", JsonEncoder::new);

    let bytes = dispatcher.serialize(&invoice(), "json").unwrap();
    assert!(!bytes.is_empty());
}

#[test]
fn test_shared_container_serves_several_dispatchers() {
    let container = Arc::new(ServiceContainer::new());
    container.register_encoder("svc.json_encoder", JsonEncoder::new);

    let mut first = LazyDispatcher::from_config(maps());
    let mut second = LazyDispatcher::from_config(maps());
    first.set_registry(&container);
    second.set_registry(&container);

    let a = first.get_encoder("json").unwrap();
    let b = second.get_encoder("json").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_dispatcher_behind_mutex() {
    let container = Arc::new(ServiceContainer::new());
    container.register_encoder("svc.json_encoder", JsonEncoder::new);
    container.register_normalizer("svc.invoice_normalizer", SerdeNormalizer::<Invoice>::new);

    let mut dispatcher = LazyDispatcher::from_config(maps());
    dispatcher.set_registry(&container);
    let shared = Arc::new(parking_lot::Mutex::new(dispatcher));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            std::thread::spawn(move || shared.lock().serialize(&invoice(), "json").map(|b| b.len()))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().unwrap() > 0);
    }
    assert_eq!(shared.lock().normalizers().len(), 1);
}

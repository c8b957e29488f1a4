/*!
 * Lazy Serializer
 * Serialization dispatcher that resolves encoders and normalizers on demand
 *
 * # Example
 *
 * ```
 * use std::sync::Arc;
 * use lazy_serializer::{
 *     type_key, JsonEncoder, LazyDispatcher, Object, ProviderMaps, SerdeNormalizer,
 *     ServiceContainer,
 * };
 * use serde::{Deserialize, Serialize};
 *
 * #[derive(Debug, Serialize, Deserialize)]
 * struct Invoice {
 *     number: String,
 * }
 *
 * impl Object for Invoice {}
 *
 * let container = Arc::new(ServiceContainer::new());
 * container.register_encoder("svc.json_encoder", JsonEncoder::new);
 * container.register_normalizer("svc.invoice_normalizer", SerdeNormalizer::<Invoice>::new);
 *
 * let maps = ProviderMaps::new()
 *     .with_encoder("json", "svc.json_encoder")
 *     .with_normalizer(type_key::<Invoice>(), "svc.invoice_normalizer");
 *
 * let mut dispatcher = LazyDispatcher::from_config(maps);
 * dispatcher.set_registry(&container);
 *
 * let invoice = Invoice { number: "INV-1".into() };
 * let bytes = dispatcher.serialize(&invoice, "json").unwrap();
 * assert_eq!(&bytes[..], br#"{"number":"INV-1"}"#);
 * ```
 */

pub mod core;
pub mod dispatcher;
pub mod encoding;
pub mod monitoring;
pub mod normalization;
pub mod registry;

// Re-exports
pub use crate::core::{
    downcast_object, type_key, AsAny, ClassProviderMap, FormatProviderMap, Object,
    Representation, SerializerError, SerializerResult,
};
pub use dispatcher::{ConfigError, ConfigResult, LazyDispatcher, ProviderMaps};
pub use encoding::{Encoder, EncoderTable, JsonEncoder};
pub use monitoring::init_tracing;
pub use normalization::{Normalizer, NormalizerChain, SerdeNormalizer};
pub use registry::{Provider, ProviderKind, RegistryError, RegistryResult, Resolver, ServiceContainer};

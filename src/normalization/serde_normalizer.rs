/*!
 * Serde Normalizer
 * Normalizes any serde-enabled type through `serde_json::Value`
 */

use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;

use super::traits::Normalizer;
use crate::core::{type_key, Object, Representation, SerializerError, SerializerResult};

/// Normalizer for a single concrete type `T`
///
/// Supports exactly the objects whose concrete type is `T` and the class
/// identifier `type_key::<T>()`. When a property list is given, only those
/// top-level fields are kept in the representation.
pub struct SerdeNormalizer<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> SerdeNormalizer<T>
where
    T: Object + Serialize + DeserializeOwned,
{
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for SerdeNormalizer<T>
where
    T: Object + Serialize + DeserializeOwned,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Normalizer for SerdeNormalizer<T>
where
    T: Object + Serialize + DeserializeOwned,
{
    fn normalize(
        &self,
        object: &dyn Object,
        _format: &str,
        properties: Option<&[String]>,
    ) -> SerializerResult<Representation> {
        let value = object.as_any().downcast_ref::<T>().ok_or_else(|| {
            SerializerError::TypeMismatch {
                expected: type_key::<T>().to_string(),
                actual: object.class_name().to_string(),
            }
        })?;

        let mut representation = serde_json::to_value(value)
            .map_err(|e| SerializerError::normalization(type_key::<T>(), e))?;

        if let (Some(properties), Representation::Object(fields)) =
            (properties, &mut representation)
        {
            fields.retain(|name, _| properties.iter().any(|p| p == name));
        }

        Ok(representation)
    }

    fn denormalize(
        &self,
        data: &Representation,
        class: &str,
        _format: Option<&str>,
    ) -> SerializerResult<Box<dyn Object>> {
        let value: T = serde_json::from_value(data.clone())
            .map_err(|e| SerializerError::denormalization(class, e))?;
        Ok(Box::new(value))
    }

    fn supports_normalization(&self, object: &dyn Object, _format: &str) -> bool {
        object.as_any().is::<T>()
    }

    fn supports_denormalization(
        &self,
        _data: &Representation,
        class: &str,
        _format: Option<&str>,
    ) -> bool {
        class == type_key::<T>()
    }

    fn name(&self) -> &str {
        "serde"
    }
}

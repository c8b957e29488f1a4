/*!
 * Core Types
 * Object identity, representations and provider maps
 */

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use super::errors::{SerializerError, SerializerResult};

/// Intermediate representation produced by normalizers and consumed by encoders
pub type Representation = serde_json::Value;

/// Format identifier -> provider key
pub type FormatProviderMap = HashMap<String, String>;

/// Type identifier -> provider key
pub type ClassProviderMap = HashMap<String, String>;

/// Fully-qualified type identifier for `T`
///
/// This is the key used in a [`ClassProviderMap`] and the value reported by
/// [`Object::class_name`] for the same type.
#[inline]
pub fn type_key<T: ?Sized>() -> &'static str {
    std::any::type_name::<T>()
}

/// Access to the concrete value behind a trait object
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A value that can travel through the normalizer chain
///
/// Implementing it is usually a one-liner: `impl Object for Invoice {}`.
/// The default `class_name` is resolved per implementing type, so calling it
/// through `&dyn Object` still reports the concrete type.
pub trait Object: AsAny + fmt::Debug + Send + Sync {
    /// Fully-qualified type identifier of the concrete value
    fn class_name(&self) -> &'static str {
        type_key::<Self>()
    }
}

/// Downcast a boxed object to its concrete type
///
/// Fails with `TypeMismatch` when the concrete type is not `T`.
pub fn downcast_object<T: Object>(object: Box<dyn Object>) -> SerializerResult<T> {
    let actual = object.class_name();
    object
        .into_any()
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| SerializerError::TypeMismatch {
            expected: type_key::<T>().to_string(),
            actual: actual.to_string(),
        })
}

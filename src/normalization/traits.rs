/*!
 * Normalizer Traits
 * Conversion between objects and their intermediate representation
 */

use crate::core::{Object, Representation, SerializerResult};

/// Converts objects to representations and back
///
/// The chain asks `supports_*` first and only calls `normalize` /
/// `denormalize` on the first normalizer that answers true.
pub trait Normalizer: Send + Sync {
    /// Produce a representation of `object`, optionally restricted to `properties`
    fn normalize(
        &self,
        object: &dyn Object,
        format: &str,
        properties: Option<&[String]>,
    ) -> SerializerResult<Representation>;

    /// Build an instance of `class` from a representation
    fn denormalize(
        &self,
        data: &Representation,
        class: &str,
        format: Option<&str>,
    ) -> SerializerResult<Box<dyn Object>>;

    fn supports_normalization(&self, object: &dyn Object, format: &str) -> bool;

    fn supports_denormalization(&self, data: &Representation, class: &str, format: Option<&str>)
        -> bool;

    /// Get the name of this normalizer (for logging/debugging)
    fn name(&self) -> &str;
}

/*!
 * Normalization Module
 * Normalizer trait, the ordered normalizer chain and the serde-backed normalizer
 */

pub mod chain;
pub mod serde_normalizer;
pub mod traits;

// Re-exports
pub use chain::NormalizerChain;
pub use serde_normalizer::SerdeNormalizer;
pub use traits::Normalizer;

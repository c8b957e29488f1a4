/*!
 * Dispatcher Module
 * Lazily-resolving serialization facade and its configuration
 */

pub mod config;
pub mod lazy;
mod resolution;

// Re-exports
pub use config::{ConfigError, ConfigResult, ProviderMaps, PROVIDER_MAP_ENV};
pub use lazy::LazyDispatcher;

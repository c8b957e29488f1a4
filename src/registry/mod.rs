/*!
 * Registry Module
 * Provider resolution by key
 */

pub mod container;
pub mod traits;

// Re-exports
pub use container::{ProviderFactory, ServiceContainer};
pub use traits::{Provider, ProviderKind, RegistryError, RegistryResult, Resolver};

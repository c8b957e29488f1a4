/*!
 * Core Module
 * Fundamental types, error handling and JSON helpers
 */

pub mod errors;
pub mod json;
pub mod types;

// Re-export for convenience
pub use errors::*;
pub use types::*;

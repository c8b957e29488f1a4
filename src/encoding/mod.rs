/*!
 * Encoding Module
 * Encoder trait, the format-keyed encoder table and built-in encoders
 */

pub mod json;
pub mod table;
pub mod traits;

// Re-exports
pub use json::JsonEncoder;
pub use table::EncoderTable;
pub use traits::Encoder;

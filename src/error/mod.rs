//! Unified error types for mimesniff.
//!
//! Detection itself never fails: every `detect*` call resolves to a MIME type.
//! Errors only surface while building signature tables or reading a prefix
//! through the lower-level APIs.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};

//! Error types for JSON decoding.

use thiserror::Error;

/// Errors raised while converting JSON text into typed values.
///
/// Structural problems -- mismatched brackets, odd key/value counts,
/// unknown record keys -- never surface here: the decoder degrades them
/// to `None` or default values. The one fatal condition is a fragment
/// that cannot be converted to a requested integer or boolean primitive.
#[derive(Error, Debug)]
pub enum BindError {
    /// A fragment could not be converted to the requested primitive kind.
    #[error("cannot convert {text:?} to {target}")]
    Convert { target: &'static str, text: String },
}

/// Convenience alias used throughout jsonbind-core.
pub type Result<T> = std::result::Result<T, BindError>;

use std::sync::Arc;

use thiserror::Error;

/// Error code the host reports when the last call succeeded.
pub const NO_ERROR: u16 = 0;

/// The host runtime's protocol object.
///
/// Every primitive answers with raw text; success is signalled by the literal
/// `"true"`. Callers are expected to wrap these results at the boundary
/// instead of passing them on.
pub trait HostApi {
    /// Begin a session. The argument is always empty.
    fn initialize(&self, arg: &str) -> String;

    /// Read a data-model element. `None` when the host has nothing to return.
    fn get_value(&self, key: &str) -> Option<String>;

    /// Write a data-model element.
    fn set_value(&self, key: &str, value: &str) -> String;

    /// Persist pending writes. The argument is always empty.
    fn commit(&self, arg: &str) -> String;

    /// End the session. The argument is always empty.
    fn finish(&self, arg: &str) -> String;

    /// Numeric code of the most recent error, as text.
    fn get_last_error(&self) -> String {
        NO_ERROR.to_string()
    }

    /// Human-readable text for an error code.
    fn get_error_string(&self, _code: &str) -> String {
        String::new()
    }
}

/// Cached, shareable handle to a located host object.
pub type SharedHostApi = Arc<dyn HostApi + Send + Sync>;

/// A rejection reported by the host's error primitives.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("host error {code}: {message}")]
pub struct HostError {
    pub code: u16,
    pub message: String,
}

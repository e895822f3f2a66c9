use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a graded item (question) within the content.
///
/// Written verbatim to `cmi.interactions.<n>.id`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new `ItemId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier for the question at `position` in a quiz (`q0`, `q1`, ...).
    #[must_use]
    pub fn question(position: usize) -> Self {
        Self(format!("q{position}"))
    }

    /// Returns the underlying text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

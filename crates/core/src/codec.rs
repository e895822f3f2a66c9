//! Text encoding of the resume bookmark stored in `cmi.suspend_data`.

use thiserror::Error;
use tracing::debug;

use crate::model::BookmarkState;

/// Largest encoded bookmark written to the host, in characters.
pub const SUSPEND_DATA_LIMIT: usize = 4000;

/// Why a stored bookmark could not be restored.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BookmarkError {
    #[error("no bookmark stored")]
    Empty,
    #[error("stored bookmark is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Serialize `state` to JSON, truncated to [`SUSPEND_DATA_LIMIT`] characters.
///
/// Truncation can leave invalid JSON behind; [`decode`] then falls back to
/// an empty bookmark.
#[must_use]
pub fn encode(state: &BookmarkState) -> String {
    // Serializing a string-keyed map of JSON values cannot fail.
    let mut text = serde_json::to_string(state).unwrap_or_default();
    if let Some((cut, _)) = text.char_indices().nth(SUSPEND_DATA_LIMIT) {
        debug!(
            len = text.chars().count(),
            limit = SUSPEND_DATA_LIMIT,
            "bookmark truncated"
        );
        text.truncate(cut);
    }
    text
}

/// Parse a stored bookmark, reporting why it could not be restored.
///
/// # Errors
///
/// Returns `BookmarkError::Empty` for blank input and
/// `BookmarkError::Malformed` for anything that is not a bookmark object.
pub fn try_decode(text: &str) -> Result<BookmarkState, BookmarkError> {
    if text.trim().is_empty() {
        return Err(BookmarkError::Empty);
    }
    Ok(serde_json::from_str(text)?)
}

/// Parse a stored bookmark, substituting an empty one on any failure.
#[must_use]
pub fn decode(text: &str) -> BookmarkState {
    try_decode(text).unwrap_or_else(|err| {
        if !matches!(err, BookmarkError::Empty) {
            debug!(error = %err, "discarding stored bookmark");
        }
        BookmarkState::default()
    })
}

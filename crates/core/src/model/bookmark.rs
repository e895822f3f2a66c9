use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

const RESERVED_KEYS: [&str; 2] = ["currentSection", "percentWatched"];

/// Resume point written to `cmi.suspend_data`.
///
/// Besides the two playback fields the blob carries free-form extension
/// fields (for example `slidesReviewed`) that other content pages add.
/// Missing playback fields read as zero so extension-only blobs still parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkState {
    #[serde(default)]
    pub current_section: usize,
    #[serde(default, deserialize_with = "clamped_percent")]
    percent_watched: u8,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn clamped_percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    u8::deserialize(deserializer).map(|percent| percent.min(100))
}

impl BookmarkState {
    /// Creates a bookmark, clamping `percent_watched` to 100.
    #[must_use]
    pub fn new(current_section: usize, percent_watched: u8) -> Self {
        Self {
            current_section,
            percent_watched: percent_watched.min(100),
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn percent_watched(&self) -> u8 {
        self.percent_watched
    }

    pub fn set_percent_watched(&mut self, percent: u8) {
        self.percent_watched = percent.min(100);
    }

    /// Percentage of `duration` covered by `position`, rounded and capped at 100.
    ///
    /// A zero or negative duration (metadata not loaded yet) counts as one second.
    #[must_use]
    pub fn percent_of(position: f64, duration: f64) -> u8 {
        let duration = if duration > 0.0 { duration } else { 1.0 };
        let pct = (position.max(0.0) / duration * 100.0).round();
        // Clamped into 0..=100 before the cast.
        pct.min(100.0) as u8
    }

    /// Reads an extension field.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Sets an extension field. Keys that collide with the playback fields are ignored.
    pub fn insert_extra(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if RESERVED_KEYS.contains(&key.as_str()) {
            return;
        }
        self.extra.insert(key, value.into());
    }

    /// True when nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current_section == 0 && self.percent_watched == 0 && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_rounded_and_capped() {
        assert_eq!(BookmarkState::percent_of(45.0, 90.0), 50);
        assert_eq!(BookmarkState::percent_of(1.0, 3.0), 33);
        assert_eq!(BookmarkState::percent_of(200.0, 100.0), 100);
        assert_eq!(BookmarkState::percent_of(0.4, 0.0), 40);
        assert_eq!(BookmarkState::percent_of(-3.0, 60.0), 0);
    }

    #[test]
    fn reserved_keys_cannot_be_shadowed() {
        let mut state = BookmarkState::new(2, 40);
        state.insert_extra("currentSection", 9);
        state.insert_extra("slidesReviewed", true);
        assert_eq!(state.current_section, 2);
        assert_eq!(state.extra("currentSection"), None);
        assert_eq!(state.extra("slidesReviewed"), Some(&Value::Bool(true)));
    }

    #[test]
    fn new_clamps_percent() {
        assert_eq!(BookmarkState::new(0, 180).percent_watched(), 100);
        assert!(BookmarkState::default().is_empty());
    }

    #[test]
    fn stored_percent_above_hundred_is_clamped() {
        let state: BookmarkState =
            serde_json::from_str(r#"{"currentSection":1,"percentWatched":250}"#).unwrap();
        assert_eq!(state.current_section, 1);
        assert_eq!(state.percent_watched(), 100);
    }
}

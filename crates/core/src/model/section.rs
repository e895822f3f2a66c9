use serde::{Deserialize, Serialize};

/// A titled chapter of a media timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(rename = "start_seconds")]
    pub start_offset_seconds: f64,
}

impl Section {
    #[must_use]
    pub fn new(title: impl Into<String>, start_offset_seconds: f64) -> Self {
        Self {
            title: title.into(),
            start_offset_seconds,
        }
    }
}

/// Index of the section playing at `t` seconds.
///
/// Returns the last section whose start is at or before `t`, or 0 when `t`
/// precedes every start. An empty slice also yields 0, which is not a valid
/// index; callers guard that case.
///
/// `sections` must be sorted by start offset.
#[must_use]
pub fn current_section(sections: &[Section], t: f64) -> usize {
    sections
        .iter()
        .rposition(|section| section.start_offset_seconds <= t)
        .unwrap_or(0)
}

//! Data-model element names understood by the host runtime.

/// Lesson status (`not attempted`, `incomplete`, `completed`, ...).
pub const LESSON_STATUS: &str = "cmi.core.lesson_status";
/// Raw score, 0-100.
pub const SCORE_RAW: &str = "cmi.core.score.raw";
/// Free-text resume location; the video player stores seconds here.
pub const LESSON_LOCATION: &str = "cmi.core.lesson_location";
/// Size-bounded free-text blob holding the serialized bookmark.
pub const SUSPEND_DATA: &str = "cmi.suspend_data";
/// Time spent in the current attempt, as a CMI timespan.
pub const SESSION_TIME: &str = "cmi.core.session_time";

/// Sub-fields of one row in the interactions table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionField {
    Id,
    StudentResponse,
    Result,
    Weighting,
    Latency,
}

impl InteractionField {
    /// All fields in the order they are written.
    pub const ALL: [InteractionField; 5] = [
        InteractionField::Id,
        InteractionField::StudentResponse,
        InteractionField::Result,
        InteractionField::Weighting,
        InteractionField::Latency,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InteractionField::Id => "id",
            InteractionField::StudentResponse => "student_response",
            InteractionField::Result => "result",
            InteractionField::Weighting => "weighting",
            InteractionField::Latency => "latency",
        }
    }
}

/// Key for `field` of interaction slot `index`, e.g. `cmi.interactions.3.result`.
#[must_use]
pub fn interaction_key(index: u32, field: InteractionField) -> String {
    format!("cmi.interactions.{index}.{}", field.as_str())
}

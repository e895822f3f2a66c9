use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown lesson status: {0}")]
pub struct ParseStatusError(pub String);

/// Values of `cmi.core.lesson_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonStatus {
    NotAttempted,
    Incomplete,
    Completed,
    Passed,
    Failed,
    Browsed,
}

impl LessonStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LessonStatus::NotAttempted => "not attempted",
            LessonStatus::Incomplete => "incomplete",
            LessonStatus::Completed => "completed",
            LessonStatus::Passed => "passed",
            LessonStatus::Failed => "failed",
            LessonStatus::Browsed => "browsed",
        }
    }

    /// Whether the learner has finished the content, regardless of outcome.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LessonStatus::Completed | LessonStatus::Passed | LessonStatus::Failed
        )
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not attempted" => Ok(Self::NotAttempted),
            "incomplete" => Ok(Self::Incomplete),
            "completed" => Ok(Self::Completed),
            "passed" => Ok(Self::Passed),
            "failed" => Ok(Self::Failed),
            "browsed" => Ok(Self::Browsed),
            other => Err(ParseStatusError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_protocol_spellings() {
        assert_eq!(
            "not attempted".parse::<LessonStatus>().unwrap(),
            LessonStatus::NotAttempted
        );
        assert_eq!("passed".parse::<LessonStatus>().unwrap(), LessonStatus::Passed);
        assert!("done".parse::<LessonStatus>().is_err());
    }

    #[test]
    fn display_matches_wire_value() {
        assert_eq!(LessonStatus::Completed.to_string(), "completed");
        assert!(LessonStatus::Failed.is_terminal());
        assert!(!LessonStatus::Incomplete.is_terminal());
    }
}

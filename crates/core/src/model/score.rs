use std::fmt;

use thiserror::Error;

use crate::model::LessonStatus;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("cannot score an assessment with no questions")]
    NoQuestions,
    #[error("correct answers ({correct}) exceed question count ({total})")]
    TooManyCorrect { correct: usize, total: usize },
}

/// Raw score as a whole percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Score(u8);

impl Score {
    /// Percentage of correct answers, rounded half away from zero.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError` when `total` is zero or smaller than `correct`.
    pub fn from_answers(correct: usize, total: usize) -> Result<Self, ScoreError> {
        if total == 0 {
            return Err(ScoreError::NoQuestions);
        }
        if correct > total {
            return Err(ScoreError::TooManyCorrect { correct, total });
        }
        let pct = (correct as f64 / total as f64 * 100.0).round();
        Ok(Self(pct as u8))
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Passed at or above `mastery`, failed below.
    #[must_use]
    pub fn status(self, mastery: u8) -> LessonStatus {
        if self.0 >= mastery {
            LessonStatus::Passed
        } else {
            LessonStatus::Failed
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_whole_percent() {
        assert_eq!(Score::from_answers(2, 3).unwrap().value(), 67);
        assert_eq!(Score::from_answers(1, 3).unwrap().value(), 33);
        assert_eq!(Score::from_answers(5, 5).unwrap().value(), 100);
    }

    #[test]
    fn mastery_threshold_is_inclusive() {
        assert_eq!(Score::from_answers(4, 5).unwrap().status(80), LessonStatus::Passed);
        assert_eq!(Score::from_answers(3, 5).unwrap().status(80), LessonStatus::Failed);
    }

    #[test]
    fn rejects_impossible_counts() {
        assert_eq!(Score::from_answers(0, 0), Err(ScoreError::NoQuestions));
        assert!(matches!(
            Score::from_answers(4, 3),
            Err(ScoreError::TooManyCorrect { .. })
        ));
    }
}

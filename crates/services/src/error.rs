//! Shared error types for the services crate.

use thiserror::Error;

use sco_core::model::ScoreError;

/// Errors emitted while loading or grading a quiz.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no questions")]
    Empty,
    #[error("question {index} has answer {answer} but only {options} options")]
    AnswerOutOfRange {
        index: usize,
        answer: usize,
        options: usize,
    },
    #[error("invalid questions file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Score(#[from] ScoreError),
}

use std::fmt;

use thiserror::Error;

use crate::model::ids::ItemId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum InteractionError {
    #[error("weighting must be in [0, 1], got {0}")]
    WeightingOutOfRange(f64),
}

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

/// Judgement of a learner response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionResult {
    Correct,
    Wrong,
    /// Ungraded or survey-style item.
    Neutral,
}

impl InteractionResult {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            InteractionResult::Correct => "correct",
            InteractionResult::Wrong => "wrong",
            InteractionResult::Neutral => "neutral",
        }
    }

    #[must_use]
    pub fn from_correct(correct: bool) -> Self {
        if correct { Self::Correct } else { Self::Wrong }
    }
}

impl fmt::Display for InteractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── WEIGHTING ─────────────────────────────────────────────────────────────────
//

/// Relative weight of an interaction, in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Weighting(f64);

impl Weighting {
    /// Full weight.
    pub const ONE: Weighting = Weighting(1.0);

    /// # Errors
    ///
    /// Returns `InteractionError::WeightingOutOfRange` for values outside `[0, 1]` or NaN.
    pub fn new(value: f64) -> Result<Self, InteractionError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InteractionError::WeightingOutOfRange(value))
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// One graded learner response, stored at a fixed slot of the interactions table.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRecord {
    pub index: u32,
    pub item_id: ItemId,
    pub student_response: String,
    pub result: InteractionResult,
    pub weighting: Weighting,
    pub latency_seconds: u32,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

use sco_core::model::cmi::{LESSON_STATUS, SCORE_RAW};
use sco_core::model::{InteractionResult, ItemId, LessonStatus, Score, Weighting};
use serde::Deserialize;
use tracing::info;

use crate::error::QuizError;
use crate::interactions::InteractionRecorder;
use crate::session::{SessionManager, SessionState};

/// A single-choice question as authored in `questions.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct choice.
    pub answer: usize,
}

/// Result of submitting a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub correct: usize,
    pub score: Score,
    pub status: LessonStatus,
    /// Whether every write and the commit were accepted by the host.
    pub reported: bool,
    /// Whether the session was closed after a pass.
    pub finished: bool,
}

/// Grades submissions and reports them as interactions, score, and status.
#[derive(Debug, Clone)]
pub struct QuizService {
    questions: Vec<Question>,
    mastery_score: u8,
}

impl QuizService {
    /// # Errors
    ///
    /// Returns `QuizError::Empty` for an empty question list and
    /// `QuizError::AnswerOutOfRange` when an answer key points past the options.
    pub fn new(questions: Vec<Question>, mastery_score: u8) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        if let Some((index, q)) = questions
            .iter()
            .enumerate()
            .find(|(_, q)| q.answer >= q.options.len())
        {
            return Err(QuizError::AnswerOutOfRange {
                index,
                answer: q.answer,
                options: q.options.len(),
            });
        }
        Ok(Self {
            questions,
            mastery_score,
        })
    }

    /// Parse a JSON array of questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Parse` for malformed JSON, otherwise as [`QuizService::new`].
    pub fn from_json(text: &str, mastery_score: u8) -> Result<Self, QuizError> {
        let questions: Vec<Question> = serde_json::from_str(text)?;
        Self::new(questions, mastery_score)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Mark every question as shown, starting its latency clock.
    pub fn present(&self, recorder: &mut InteractionRecorder) {
        for position in 0..self.questions.len() {
            recorder.mark_presented(&ItemId::question(position));
        }
    }

    /// Grade `answers` (one chosen option per question, `None` if skipped).
    ///
    /// Records one interaction per question, the raw score, and
    /// passed/failed against the mastery score, then commits. A pass also
    /// finishes the session.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Score` if the question count cannot be scored.
    pub fn submit(
        &self,
        session: &mut SessionManager,
        recorder: &mut InteractionRecorder,
        answers: &[Option<usize>],
    ) -> Result<QuizOutcome, QuizError> {
        let total = self.questions.len();
        // 1/n is within [0, 1] for any n >= 1.
        let weighting = Weighting::new(1.0 / total as f64).unwrap_or(Weighting::ONE);

        let mut correct = 0;
        let mut reported = true;
        for (position, question) in self.questions.iter().enumerate() {
            let chosen = answers.get(position).copied().flatten();
            let is_correct = chosen == Some(question.answer);
            if is_correct {
                correct += 1;
            }
            let response = chosen.map(|c| c.to_string()).unwrap_or_default();
            reported &= recorder.push(
                session,
                ItemId::question(position),
                response,
                InteractionResult::from_correct(is_correct),
                weighting,
            );
        }

        let score = Score::from_answers(correct, total)?;
        let status = score.status(self.mastery_score);
        reported &= session.set(SCORE_RAW, score);
        reported &= session.set(LESSON_STATUS, status);
        reported &= session.commit();

        let finished = status == LessonStatus::Passed
            && session.state() == SessionState::Initialized
            && session.finish();

        info!(%score, %status, correct, total, "quiz submitted");
        Ok(QuizOutcome {
            correct,
            score,
            status,
            reported,
            finished,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_inconsistent_quizzes() {
        assert!(matches!(QuizService::new(Vec::new(), 80), Err(QuizError::Empty)));

        let bad = vec![Question {
            question: "2 + 2?".into(),
            options: vec!["3".into(), "4".into()],
            answer: 2,
        }];
        assert!(matches!(
            QuizService::new(bad, 80),
            Err(QuizError::AnswerOutOfRange { index: 0, answer: 2, options: 2 })
        ));
    }

    #[test]
    fn parses_question_file() {
        let raw = r#"[{"question":"Capital of France?","options":["Paris","Rome"],"answer":0}]"#;
        let quiz = QuizService::from_json(raw, 80).unwrap();
        assert_eq!(quiz.questions().len(), 1);
        assert!(matches!(QuizService::from_json("{", 80), Err(QuizError::Parse(_))));
    }
}

#![forbid(unsafe_code)]

pub mod error;
pub mod interactions;
pub mod playback;
pub mod quiz;
pub mod session;
pub mod slides;

pub use sco_core::Clock;

pub use error::QuizError;
pub use interactions::{InteractionRecorder, record};
pub use playback::{PlaybackReporter, Playhead, Resume, TickReport};
pub use quiz::{Question, QuizOutcome, QuizService};
pub use session::{SessionManager, SessionState};
pub use slides::mark_reviewed;

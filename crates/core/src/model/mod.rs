mod bookmark;
pub mod cmi;
mod ids;
mod interaction;
mod score;
pub mod section;
mod settings;
mod status;

pub use bookmark::BookmarkState;
pub use ids::ItemId;
pub use interaction::{InteractionError, InteractionRecord, InteractionResult, Weighting};
pub use score::{Score, ScoreError};
pub use section::{Section, current_section};
pub use settings::{ReportingSettings, ReportingSettingsDraft, SettingsError};
pub use status::{LessonStatus, ParseStatusError};

//! Progress reporting for the video player.

use sco_core::model::cmi::{LESSON_LOCATION, LESSON_STATUS, SESSION_TIME, SUSPEND_DATA};
use sco_core::model::{BookmarkState, LessonStatus, ReportingSettings, Section, current_section};
use sco_core::time::cmi_timespan;
use sco_core::{decode, encode};
use tracing::{debug, info};

use crate::session::{SessionManager, SessionState};

/// Source of the current playback position.
pub trait Playhead {
    /// Seconds from the start of the media.
    fn position(&self) -> f64;

    /// Media length in seconds; 0 while unknown.
    fn duration(&self) -> f64;

    fn has_ended(&self) -> bool;
}

/// Where to pick up a previous attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Resume {
    /// Seek target from the location field, if one was stored.
    pub position: Option<f64>,
    /// Status left by the previous attempt, if the host reported a known one.
    pub status: Option<LessonStatus>,
    pub bookmark: BookmarkState,
}

/// Outcome of one reporting tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub location_saved: bool,
    pub bookmark_saved: bool,
    pub committed: bool,
}

impl TickReport {
    #[must_use]
    pub fn all_saved(&self) -> bool {
        self.location_saved && self.bookmark_saved && self.committed
    }
}

/// Pushes playback position and bookmark to the host.
#[derive(Debug)]
pub struct PlaybackReporter {
    sections: Vec<Section>,
    settings: ReportingSettings,
    bookmark: BookmarkState,
    completion_reported: bool,
}

impl PlaybackReporter {
    #[must_use]
    pub fn new(sections: Vec<Section>, settings: ReportingSettings) -> Self {
        Self {
            sections,
            settings,
            bookmark: BookmarkState::default(),
            completion_reported: false,
        }
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn bookmark(&self) -> &BookmarkState {
        &self.bookmark
    }

    /// Section playing at `position`, or `None` for an empty timeline.
    #[must_use]
    pub fn section_at(&self, position: f64) -> Option<&Section> {
        self.sections.get(current_section(&self.sections, position))
    }

    /// Read the stored location and bookmark from a previous launch.
    ///
    /// Unusable values are dropped: a blank or non-numeric location yields no
    /// seek target and an unreadable bookmark yields an empty one. A lesson
    /// already completed, passed or failed is not marked completed again.
    pub fn restore(&mut self, session: &SessionManager) -> Resume {
        let position = session
            .get(LESSON_LOCATION)
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|secs| secs.is_finite() && *secs >= 0.0);
        let raw_status = session.get(LESSON_STATUS);
        let status = match raw_status.parse::<LessonStatus>() {
            Ok(status) => Some(status),
            Err(_) if raw_status.is_empty() => None,
            Err(err) => {
                debug!(error = %err, "ignoring stored lesson status");
                None
            }
        };
        self.completion_reported = status.is_some_and(LessonStatus::is_terminal);
        self.bookmark = decode(&session.get(SUSPEND_DATA));
        debug!(
            ?position,
            ?status,
            section = self.bookmark.current_section,
            "resume point restored"
        );
        Resume {
            position,
            status,
            bookmark: self.bookmark.clone(),
        }
    }

    /// Report the current position, bookmark, and commit.
    ///
    /// Returns `None` without touching the host unless the session is open.
    pub fn tick(
        &mut self,
        session: &mut SessionManager,
        position: f64,
        duration: f64,
    ) -> Option<TickReport> {
        if session.state() != SessionState::Initialized {
            return None;
        }

        let location_saved = session.set(LESSON_LOCATION, format!("{position:.1}"));
        let bookmark_saved = self.save_bookmark(session, position, duration);

        let committed = session.commit();
        Some(TickReport {
            location_saved,
            bookmark_saved,
            committed,
        })
    }

    /// Playback progress hook; marks the lesson completed once enough was watched.
    ///
    /// Returns true when the status was written by this call.
    pub fn observe(&mut self, session: &mut SessionManager, position: f64, duration: f64) -> bool {
        // NaN duration means the media metadata has not loaded yet.
        if self.completion_reported || duration.is_nan() || duration <= 0.0 {
            return false;
        }
        if !position.is_finite() {
            return false;
        }
        if position / duration < self.settings.completion_threshold() {
            return false;
        }
        self.completion_reported = session.set(LESSON_STATUS, LessonStatus::Completed);
        if self.completion_reported {
            info!(position, duration, "watch threshold reached");
        }
        self.completion_reported
    }

    /// Explicit "mark complete": status, commit, finish.
    pub fn complete(&mut self, session: &mut SessionManager) -> bool {
        let status = session.set(LESSON_STATUS, LessonStatus::Completed);
        self.completion_reported |= status;
        let committed = session.commit();
        let finished = session.finish();
        status && committed && finished
    }

    /// Final flush when the content unloads: location, bookmark, session time,
    /// commit, finish.
    ///
    /// Does nothing when the session is not open.
    pub fn teardown(&mut self, session: &mut SessionManager, position: f64, duration: f64) -> bool {
        if session.state() != SessionState::Initialized {
            return false;
        }
        let location = session.set(LESSON_LOCATION, format!("{position:.1}"));
        let bookmark = self.save_bookmark(session, position, duration);
        let elapsed = cmi_timespan(session.session_time());
        let time = session.set(SESSION_TIME, elapsed);
        let committed = session.commit();
        let finished = session.finish();
        location && bookmark && time && committed && finished
    }

    fn save_bookmark(
        &mut self,
        session: &mut SessionManager,
        position: f64,
        duration: f64,
    ) -> bool {
        self.bookmark.current_section = current_section(&self.sections, position);
        self.bookmark
            .set_percent_watched(BookmarkState::percent_of(position, duration));
        session.set(SUSPEND_DATA, encode(&self.bookmark))
    }

    /// Tick on the configured interval until the session closes or the media ends.
    ///
    /// The first tick fires one interval after the call. Returns the number
    /// of ticks reported. The caller runs [`PlaybackReporter::teardown`].
    pub async fn run<P: Playhead>(&mut self, session: &mut SessionManager, player: &P) -> usize {
        let mut interval = tokio::time::interval(self.settings.tick_interval());
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        interval.tick().await;

        let mut ticks = 0;
        loop {
            interval.tick().await;
            if session.state() != SessionState::Initialized {
                debug!(ticks, "session closed; reporter stopped");
                break;
            }
            let position = player.position();
            let duration = player.duration();
            self.observe(session, position, duration);
            if self.tick(session, position, duration).is_some() {
                ticks += 1;
            }
            if player.has_ended() {
                debug!(ticks, "media ended; reporter stopped");
                break;
            }
        }
        ticks
    }
}

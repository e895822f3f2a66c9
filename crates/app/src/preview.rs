//! Local preview: content wired to an in-process host inside a frame hierarchy.

use std::path::Path;
use std::sync::Arc;

use host::{FrameTree, InMemoryHost, SharedHostApi};
use sco_core::Clock;
use sco_core::model::cmi::{LESSON_LOCATION, LESSON_STATUS, SCORE_RAW, SESSION_TIME, SUSPEND_DATA};
use sco_core::model::{ReportingSettings, Section};
use services::{
    InteractionRecorder, PlaybackReporter, Playhead, QuizService, SessionManager, mark_reviewed,
};
use tokio::time::Instant;
use tracing::{info, warn};

/// Media clock that runs `speed` times faster than real time.
struct SimulatedPlayer {
    started: Instant,
    offset: f64,
    speed: f64,
    duration: f64,
}

impl Playhead for SimulatedPlayer {
    fn position(&self) -> f64 {
        let played = self.started.elapsed().as_secs_f64() * self.speed;
        (self.offset + played).min(self.duration)
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn has_ended(&self) -> bool {
        self.position() >= self.duration
    }
}

/// An LMS page (top) that launched the content two frames deep.
fn launch(host: &InMemoryHost, standalone: bool) -> SessionManager {
    let mut tree = FrameTree::new();
    let lms = tree.add_top();
    let content = tree.add_nested(lms, 2);
    if !standalone {
        let api: SharedHostApi = Arc::new(host.clone());
        tree.attach_api(lms, api);
    }
    let tree = Arc::new(tree);
    SessionManager::from_window(tree.window(content)).with_clock(Clock::default_clock())
}

fn demo_sections() -> Vec<Section> {
    vec![
        Section::new("Introduction", 0.0),
        Section::new("Building formulas", 30.0),
        Section::new("Lookups", 75.0),
        Section::new("Summary", 105.0),
    ]
}

fn report_host(host: &InMemoryHost) {
    for key in [LESSON_STATUS, SCORE_RAW, LESSON_LOCATION, SESSION_TIME, SUSPEND_DATA] {
        if let Some(value) = host.value(key) {
            println!("{key} = {value}");
        }
    }
    println!("commits = {}", host.commits());
}

pub async fn video(
    settings: ReportingSettings,
    standalone: bool,
    sections: Option<&Path>,
    duration: f64,
    speed: f64,
    resume: Option<f64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let sections = match sections {
        Some(path) => serde_json::from_str::<Vec<Section>>(&std::fs::read_to_string(path)?)?,
        None => demo_sections(),
    };

    let mut host = InMemoryHost::new();
    if let Some(secs) = resume {
        host = host.with_value(LESSON_LOCATION, &format!("{secs:.1}"));
    }
    let mut session = launch(&host, standalone);
    if !session.init() {
        warn!("no host session; progress will not be reported");
    }

    let mut reporter = PlaybackReporter::new(sections, settings);
    let restored = reporter.restore(&session);
    let player = SimulatedPlayer {
        started: Instant::now(),
        offset: restored.position.unwrap_or(0.0),
        speed,
        duration,
    };
    if let Some(section) = reporter.section_at(player.position()) {
        info!(title = %section.title, position = player.position(), "playback started");
    }

    tokio::select! {
        ticks = reporter.run(&mut session, &player) => info!(ticks, "reporting finished"),
        _ = tokio::signal::ctrl_c() => info!("interrupted"),
    }

    reporter.teardown(&mut session, player.position(), player.duration());
    report_host(&host);
    Ok(())
}

pub fn quiz(
    settings: &ReportingSettings,
    standalone: bool,
    questions: &Path,
    answers: &[Option<usize>],
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(questions)?;
    let quiz = QuizService::from_json(&raw, settings.mastery_score())?;
    let host = InMemoryHost::new();
    let mut session = launch(&host, standalone);
    session.init();

    let mut recorder = InteractionRecorder::new(Clock::default_clock());
    quiz.present(&mut recorder);
    let outcome = quiz.submit(&mut session, &mut recorder, answers)?;

    println!(
        "score = {}% ({}/{}) -> {}",
        outcome.score,
        outcome.correct,
        quiz.questions().len(),
        outcome.status
    );
    report_host(&host);
    Ok(())
}

pub fn slides(standalone: bool) {
    let host = InMemoryHost::new();
    let mut session = launch(&host, standalone);
    session.init();
    if !mark_reviewed(&mut session) {
        warn!("review marker not stored");
    }
    report_host(&host);
}

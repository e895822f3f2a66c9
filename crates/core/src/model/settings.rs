use std::time::Duration;

use thiserror::Error;

const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5);
const DEFAULT_COMPLETION_THRESHOLD: f64 = 0.9;
const DEFAULT_MASTERY_SCORE: u8 = 80;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("tick interval must be > 0")]
    InvalidTickInterval,
    #[error("completion threshold must be in (0, 1], got {0}")]
    InvalidCompletionThreshold(f64),
    #[error("mastery score must be <= 100, got {0}")]
    InvalidMasteryScore(u8),
}

/// Tunables for progress reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportingSettings {
    tick_interval: Duration,
    completion_threshold: f64,
    mastery_score: u8,
}

/// Unvalidated overrides; unset fields take the defaults.
#[derive(Clone, Debug, Default)]
pub struct ReportingSettingsDraft {
    pub tick_interval: Option<Duration>,
    pub completion_threshold: Option<f64>,
    pub mastery_score: Option<u8>,
}

impl ReportingSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft into settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if any override is out of range.
    pub fn validate(self) -> Result<ReportingSettings, SettingsError> {
        let tick_interval = self.tick_interval.unwrap_or(DEFAULT_TICK_INTERVAL);
        if tick_interval.is_zero() {
            return Err(SettingsError::InvalidTickInterval);
        }

        let completion_threshold = self
            .completion_threshold
            .unwrap_or(DEFAULT_COMPLETION_THRESHOLD);
        if !(completion_threshold > 0.0 && completion_threshold <= 1.0) {
            return Err(SettingsError::InvalidCompletionThreshold(
                completion_threshold,
            ));
        }

        let mastery_score = self.mastery_score.unwrap_or(DEFAULT_MASTERY_SCORE);
        if mastery_score > 100 {
            return Err(SettingsError::InvalidMasteryScore(mastery_score));
        }

        Ok(ReportingSettings {
            tick_interval,
            completion_threshold,
            mastery_score,
        })
    }
}

impl ReportingSettings {
    /// How often the playback position is pushed to the host.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Fraction of the media that counts as watched to completion.
    #[must_use]
    pub fn completion_threshold(&self) -> f64 {
        self.completion_threshold
    }

    /// Minimum quiz score for `passed`.
    #[must_use]
    pub fn mastery_score(&self) -> u8 {
        self.mastery_score
    }
}

impl Default for ReportingSettings {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            completion_threshold: DEFAULT_COMPLETION_THRESHOLD,
            mastery_score: DEFAULT_MASTERY_SCORE,
        }
    }
}

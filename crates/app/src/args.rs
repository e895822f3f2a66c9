use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use sco_core::model::{ReportingSettings, ReportingSettingsDraft, SettingsError};

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidNumber { flag: &'static str, raw: String },
    InvalidAnswers { raw: String },
    MissingQuestions,
    Settings(SettingsError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidAnswers { raw } => write!(f, "invalid --answers value: {raw}"),
            ArgsError::MissingQuestions => write!(f, "quiz requires --questions <path>"),
            ArgsError::Settings(err) => write!(f, "invalid settings: {err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  sco-preview video  [--sections <json>] [--duration <secs>] [--speed <x>] [--resume <secs>]"
    );
    eprintln!("  sco-preview quiz   --questions <json> [--answers 0,1,-,2]");
    eprintln!("  sco-preview slides");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --standalone                 run without a host in the frame hierarchy");
    eprintln!("  --tick-ms <ms>               reporting interval (default 5000)");
    eprintln!("  --completion-threshold <f>   watched fraction that completes a video");
    eprintln!("  --mastery <0-100>            passing quiz score (default 80)");
    eprintln!("  -v, --verbose                debug logging");
    eprintln!();
    eprintln!("Environment (flags take precedence):");
    eprintln!("  SCO_TICK_MS, SCO_COMPLETION_THRESHOLD, SCO_MASTERY_SCORE, RUST_LOG");
}

#[derive(Debug)]
pub enum Command {
    Video {
        sections: Option<PathBuf>,
        duration: f64,
        speed: f64,
        resume: Option<f64>,
    },
    Quiz {
        questions: PathBuf,
        answers: Vec<Option<usize>>,
    },
    Slides,
}

#[derive(Debug)]
pub struct Args {
    pub command: Command,
    pub standalone: bool,
    pub verbose: bool,
    pub settings: ReportingSettings,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number<T: std::str::FromStr>(raw: String, flag: &'static str) -> Result<T, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

/// `0,1,-,2` → chosen option per question, `-` for skipped.
fn parse_answers(raw: &str) -> Result<Vec<Option<usize>>, ArgsError> {
    raw.split(',')
        .map(|part| match part.trim() {
            "-" | "" => Ok(None),
            value => value.parse().map(Some).map_err(|_| ArgsError::InvalidAnswers {
                raw: raw.to_owned(),
            }),
        })
        .collect()
}

fn env_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ArgsError> {
    match std::env::var(name) {
        Ok(raw) => parse_number(raw, name).map(Some),
        Err(_) => Ok(None),
    }
}

fn settings_from_env() -> Result<ReportingSettingsDraft, ArgsError> {
    Ok(ReportingSettingsDraft {
        tick_interval: env_var::<u64>("SCO_TICK_MS")?.map(Duration::from_millis),
        completion_threshold: env_var("SCO_COMPLETION_THRESHOLD")?,
        mastery_score: env_var("SCO_MASTERY_SCORE")?,
    })
}

/// Overlays `flags` on `base`; a field set on the command line wins.
fn merge_settings(
    base: ReportingSettingsDraft,
    flags: ReportingSettingsDraft,
) -> Result<ReportingSettings, ArgsError> {
    ReportingSettingsDraft {
        tick_interval: flags.tick_interval.or(base.tick_interval),
        completion_threshold: flags.completion_threshold.or(base.completion_threshold),
        mastery_score: flags.mastery_score.or(base.mastery_score),
    }
    .validate()
    .map_err(ArgsError::Settings)
}

impl Args {
    /// Returns `Ok(None)` when help was requested.
    pub fn parse(argv: impl IntoIterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut args = argv.into_iter();
        let name = match args.next() {
            None => "video".to_owned(),
            Some(first) if first == "--help" || first == "-h" => return Ok(None),
            Some(first) => first,
        };

        let mut standalone = false;
        let mut verbose = false;
        let mut sections = None;
        let mut duration = 120.0;
        let mut speed = 10.0;
        let mut resume = None;
        let mut questions = None;
        let mut answers = Vec::new();
        let mut overrides = ReportingSettingsDraft::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--standalone" => standalone = true,
                "--verbose" | "-v" => verbose = true,
                "--sections" => {
                    sections = Some(PathBuf::from(require_value(&mut args, "--sections")?));
                }
                "--duration" => {
                    duration = parse_number(require_value(&mut args, "--duration")?, "--duration")?;
                }
                "--speed" => {
                    speed = parse_number(require_value(&mut args, "--speed")?, "--speed")?;
                }
                "--resume" => {
                    let raw = require_value(&mut args, "--resume")?;
                    resume = Some(parse_number(raw, "--resume")?);
                }
                "--questions" => {
                    questions = Some(PathBuf::from(require_value(&mut args, "--questions")?));
                }
                "--answers" => answers = parse_answers(&require_value(&mut args, "--answers")?)?,
                "--tick-ms" => {
                    let raw = require_value(&mut args, "--tick-ms")?;
                    let millis: u64 = parse_number(raw, "--tick-ms")?;
                    overrides.tick_interval = Some(Duration::from_millis(millis));
                }
                "--completion-threshold" => {
                    let raw = require_value(&mut args, "--completion-threshold")?;
                    let threshold = parse_number(raw, "--completion-threshold")?;
                    overrides.completion_threshold = Some(threshold);
                }
                "--mastery" => {
                    let raw = require_value(&mut args, "--mastery")?;
                    overrides.mastery_score = Some(parse_number(raw, "--mastery")?);
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let command = match name.as_str() {
            "video" => Command::Video {
                sections,
                duration,
                speed,
                resume,
            },
            "quiz" => Command::Quiz {
                questions: questions.ok_or(ArgsError::MissingQuestions)?,
                answers,
            },
            "slides" => Command::Slides,
            _ => return Err(ArgsError::UnknownCommand(name)),
        };

        Ok(Some(Self {
            command,
            standalone,
            verbose,
            settings: merge_settings(settings_from_env()?, overrides)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn parses_quiz_answers_with_skips() {
        assert_eq!(
            parse_answers("0,1,-,2").unwrap(),
            vec![Some(0), Some(1), None, Some(2)]
        );
        assert!(parse_answers("0,x").is_err());
    }

    #[test]
    fn quiz_requires_questions() {
        let err = Args::parse(argv(&["quiz"])).unwrap_err();
        assert!(matches!(err, ArgsError::MissingQuestions));
    }

    #[test]
    fn video_flags_are_read() {
        let args = Args::parse(argv(&["video", "--duration", "60", "--resume", "12.5", "-v"]))
            .unwrap()
            .unwrap();
        assert!(args.verbose);
        match args.command {
            Command::Video { duration, resume, .. } => {
                assert_eq!(duration, 60.0);
                assert_eq!(resume, Some(12.5));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn settings_flags_override_defaults() {
        let args = Args::parse(argv(&[
            "quiz",
            "--questions",
            "q.json",
            "--tick-ms",
            "250",
            "--completion-threshold",
            "0.75",
            "--mastery",
            "60",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(args.settings.tick_interval(), Duration::from_millis(250));
        assert_eq!(args.settings.completion_threshold(), 0.75);
        assert_eq!(args.settings.mastery_score(), 60);
    }

    #[test]
    fn flag_wins_over_environment_value() {
        let base = ReportingSettingsDraft {
            mastery_score: Some(70),
            completion_threshold: Some(0.5),
            ..ReportingSettingsDraft::default()
        };
        let flags = ReportingSettingsDraft {
            mastery_score: Some(90),
            ..ReportingSettingsDraft::default()
        };
        let settings = merge_settings(base, flags).unwrap();
        assert_eq!(settings.mastery_score(), 90);
        assert_eq!(settings.completion_threshold(), 0.5);
    }

    #[test]
    fn invalid_settings_flag_is_rejected() {
        assert!(matches!(
            Args::parse(argv(&["video", "--mastery", "140"])),
            Err(ArgsError::Settings(_))
        ));
        assert!(matches!(
            Args::parse(argv(&["video", "--tick-ms", "soon"])),
            Err(ArgsError::InvalidNumber { flag: "--tick-ms", .. })
        ));
    }

    #[test]
    fn help_and_unknown_input() {
        assert!(Args::parse(argv(&["--help"])).unwrap().is_none());
        assert!(matches!(
            Args::parse(argv(&["video", "--bogus"])),
            Err(ArgsError::UnknownArg(_))
        ));
        assert!(matches!(
            Args::parse(argv(&["lecture"])),
            Err(ArgsError::UnknownCommand(_))
        ));
    }
}

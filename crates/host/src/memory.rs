//! In-process stand-in for an LMS runtime, used by tests and local preview.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::trace;

use crate::api::{HostApi, NO_ERROR};

const GENERAL_EXCEPTION: u16 = 101;
const INVALID_ARGUMENT: u16 = 201;
const NOT_INITIALIZED: u16 = 301;

/// Host primitives, for call accounting and fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Initialize,
    GetValue,
    SetValue,
    Commit,
    Finish,
}

/// Number of times each primitive was invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub initialize: usize,
    pub get_value: usize,
    pub set_value: usize,
    pub commit: usize,
    pub finish: usize,
}

impl CallCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.initialize + self.get_value + self.set_value + self.commit + self.finish
    }

    fn bump(&mut self, primitive: Primitive) {
        match primitive {
            Primitive::Initialize => self.initialize += 1,
            Primitive::GetValue => self.get_value += 1,
            Primitive::SetValue => self.set_value += 1,
            Primitive::Commit => self.commit += 1,
            Primitive::Finish => self.finish += 1,
        }
    }
}

#[derive(Default)]
struct HostState {
    values: HashMap<String, String>,
    active: bool,
    last_error: u16,
    commits: usize,
    calls: CallCounts,
    rejected: HashSet<Primitive>,
}

impl HostState {
    fn reply(&mut self, code: u16) -> String {
        self.last_error = code;
        (code == NO_ERROR).to_string()
    }

    /// Counts the call and reports whether it was scripted to fail.
    fn enter(&mut self, primitive: Primitive) -> bool {
        self.calls.bump(primitive);
        self.rejected.contains(&primitive)
    }
}

/// Data-model store behind the `LMS*` primitives.
///
/// Values persist across `finish` and re-`initialize`, the way an LMS keeps
/// an attempt's data between launches. Reads are always answered; writes and
/// commits require an active session.
#[derive(Clone, Default)]
pub struct InMemoryHost {
    state: Arc<Mutex<HostState>>,
}

impl InMemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate an element, as if stored by a previous attempt.
    #[must_use]
    pub fn with_value(self, key: &str, value: &str) -> Self {
        self.lock().values.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Make every future call to `primitive` fail with a general exception.
    pub fn reject(&self, primitive: Primitive) {
        self.lock().rejected.insert(primitive);
    }

    /// Undo [`InMemoryHost::reject`].
    pub fn accept(&self, primitive: Primitive) {
        self.lock().rejected.remove(&primitive);
    }

    /// Stored value of an element, bypassing the protocol.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.lock().values.get(key).cloned()
    }

    #[must_use]
    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }

    /// Number of successful commits.
    #[must_use]
    pub fn commits(&self) -> usize {
        self.lock().commits
    }

    /// Whether a session is currently open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.lock().active
    }

    fn lock(&self) -> MutexGuard<'_, HostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HostApi for InMemoryHost {
    fn initialize(&self, arg: &str) -> String {
        let mut state = self.lock();
        if state.enter(Primitive::Initialize) {
            return state.reply(GENERAL_EXCEPTION);
        }
        if !arg.is_empty() {
            return state.reply(INVALID_ARGUMENT);
        }
        if state.active {
            return state.reply(GENERAL_EXCEPTION);
        }
        state.active = true;
        trace!("session opened");
        state.reply(NO_ERROR)
    }

    fn get_value(&self, key: &str) -> Option<String> {
        let mut state = self.lock();
        if state.enter(Primitive::GetValue) {
            state.last_error = GENERAL_EXCEPTION;
            return None;
        }
        state.last_error = NO_ERROR;
        state.values.get(key).cloned()
    }

    fn set_value(&self, key: &str, value: &str) -> String {
        let mut state = self.lock();
        if state.enter(Primitive::SetValue) {
            return state.reply(GENERAL_EXCEPTION);
        }
        if !state.active {
            return state.reply(NOT_INITIALIZED);
        }
        state.values.insert(key.to_owned(), value.to_owned());
        state.reply(NO_ERROR)
    }

    fn commit(&self, arg: &str) -> String {
        let mut state = self.lock();
        if state.enter(Primitive::Commit) {
            return state.reply(GENERAL_EXCEPTION);
        }
        if !arg.is_empty() {
            return state.reply(INVALID_ARGUMENT);
        }
        if !state.active {
            return state.reply(NOT_INITIALIZED);
        }
        state.commits += 1;
        state.reply(NO_ERROR)
    }

    fn finish(&self, arg: &str) -> String {
        let mut state = self.lock();
        if state.enter(Primitive::Finish) {
            return state.reply(GENERAL_EXCEPTION);
        }
        if !arg.is_empty() {
            return state.reply(INVALID_ARGUMENT);
        }
        if !state.active {
            return state.reply(NOT_INITIALIZED);
        }
        state.active = false;
        trace!("session closed");
        state.reply(NO_ERROR)
    }

    fn get_last_error(&self) -> String {
        self.lock().last_error.to_string()
    }

    fn get_error_string(&self, code: &str) -> String {
        match code.parse::<u16>() {
            Ok(NO_ERROR) => "No error",
            Ok(GENERAL_EXCEPTION) => "General exception",
            Ok(INVALID_ARGUMENT) => "Invalid argument error",
            Ok(NOT_INITIALIZED) => "Not initialized",
            _ => "Unknown error",
        }
        .to_owned()
    }
}

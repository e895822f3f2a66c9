use std::fmt;

use chrono::{DateTime, Utc};
use host::{HostApi, HostError, SharedHostApi};
use sco_core::{Clock, Window, locate};
use tracing::{debug, info, warn};

/// Sentinel some hosts return for elements that were never written.
const UNDEFINED: &str = "undefined";

/// Code assumed when the host's error text is not a number.
const UNKNOWN_ERROR_CODE: u16 = 101;

type Locator = Box<dyn Fn() -> Option<SharedHostApi> + Send + Sync>;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle of a session with the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Initialized,
    /// Terminated; reads still work and `init` opens a new session.
    Finished,
}

//
// ─── MANAGER ───────────────────────────────────────────────────────────────────
//

/// Owns the host handle and the session lifecycle.
///
/// Every operation degrades to `false` or empty text instead of failing, so
/// content keeps working outside a host (local preview). Raw protocol text
/// never leaves this type.
pub struct SessionManager {
    locator: Option<Locator>,
    api: Option<SharedHostApi>,
    state: SessionState,
    clock: Clock,
    started_at: Option<DateTime<Utc>>,
    last_error: Option<HostError>,
}

impl SessionManager {
    /// Manager that searches for the host starting at `window` on first `init`.
    #[must_use]
    pub fn from_window<W>(window: W) -> Self
    where
        W: Window<Api = SharedHostApi> + Clone + Send + Sync + 'static,
    {
        Self::with_locator(Box::new(move || locate(&window)))
    }

    /// Manager bound to an already located host object.
    #[must_use]
    pub fn with_api(api: SharedHostApi) -> Self {
        Self {
            api: Some(api),
            ..Self::detached()
        }
    }

    /// Manager with no host at all; every operation is a no-op.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            locator: None,
            api: None,
            state: SessionState::Uninitialized,
            clock: Clock::default(),
            started_at: None,
            last_error: None,
        }
    }

    fn with_locator(locator: Locator) -> Self {
        Self {
            locator: Some(locator),
            ..Self::detached()
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a host object has been located.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.api.is_some()
    }

    /// The most recent rejection reported by the host.
    #[must_use]
    pub fn last_error(&self) -> Option<&HostError> {
        self.last_error.as_ref()
    }

    /// Whole seconds since the current session was opened.
    #[must_use]
    pub fn session_time(&self) -> u32 {
        self.started_at
            .map_or(0, |started| self.clock.seconds_since(started))
    }

    /// Open a session.
    ///
    /// Locates the host if it has not been found yet. Calling this while a
    /// session is open succeeds without contacting the host again.
    pub fn init(&mut self) -> bool {
        if self.api.is_none() {
            self.api = self.locator.as_ref().and_then(|find| find());
        }
        let Some(api) = self.api.clone() else {
            debug!("no host api reachable; running standalone");
            return false;
        };
        if self.state == SessionState::Initialized {
            return true;
        }

        let raw = api.initialize("");
        if self.accepted(api.as_ref(), "initialize", &raw) {
            self.state = SessionState::Initialized;
            self.started_at = Some(self.clock.now());
            info!("session initialized");
            true
        } else {
            false
        }
    }

    /// Read a data-model element.
    ///
    /// Returns empty text when no session was ever opened, when the host has
    /// no value, or when the host answers with the text `undefined`. A value
    /// legitimately stored as `undefined` is therefore indistinguishable from
    /// a missing one.
    pub fn get(&self, key: &str) -> String {
        let Some(api) = self.api.as_ref() else {
            return String::new();
        };
        if self.state == SessionState::Uninitialized {
            return String::new();
        }
        match api.get_value(key) {
            Some(value) if value != UNDEFINED => {
                debug!(key, "host value read");
                value
            }
            _ => String::new(),
        }
    }

    /// Write a data-model element, rendering `value` as text.
    pub fn set(&mut self, key: &str, value: impl fmt::Display) -> bool {
        let Some(api) = self.open_api() else {
            return false;
        };
        let value = value.to_string();
        let raw = api.set_value(key, &value);
        debug!(key, %value, "host value write");
        self.accepted(api.as_ref(), "set_value", &raw)
    }

    /// Ask the host to persist pending writes.
    pub fn commit(&mut self) -> bool {
        let Some(api) = self.open_api() else {
            return false;
        };
        let raw = api.commit("");
        self.accepted(api.as_ref(), "commit", &raw)
    }

    /// Terminate the session.
    ///
    /// The session counts as closed whatever the host answers, so a later
    /// `init` runs the initialize primitive again. The host handle is kept.
    pub fn finish(&mut self) -> bool {
        let Some(api) = self.api.clone() else {
            return false;
        };
        let raw = api.finish("");
        let ok = self.accepted(api.as_ref(), "finish", &raw);
        if self.state == SessionState::Initialized {
            self.state = SessionState::Finished;
            info!(ok, session_time = self.session_time(), "session finished");
        }
        ok
    }

    fn open_api(&self) -> Option<SharedHostApi> {
        match self.state {
            SessionState::Initialized => self.api.clone(),
            _ => None,
        }
    }

    fn accepted(
        &mut self,
        api: &(dyn HostApi + Send + Sync),
        primitive: &'static str,
        raw: &str,
    ) -> bool {
        if raw == "true" {
            return true;
        }
        let code_text = api.get_last_error();
        let code = code_text.trim().parse().unwrap_or(UNKNOWN_ERROR_CODE);
        let message = api.get_error_string(&code_text);
        warn!(primitive, code, %message, "host rejected call");
        self.last_error = Some(HostError { code, message });
        false
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("connected", &self.is_connected())
            .field("state", &self.state)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

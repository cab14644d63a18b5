//! Per-orchestrator session: the state machine, the request sequence, and
//! the single "current route" slot.

use std::fmt;

use routeplan_core::{RouteResult, TravelMode, UnitSystem};

use crate::display::DisplayModel;
use crate::RouteError;

/// `Idle → Resolving → Routing → Displayed`, with `Error` reachable from
/// `Resolving` or `Routing`, and a clear returning to `Idle` from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Resolving,
    Routing,
    Displayed,
    Error,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Idle => "idle",
            SessionState::Resolving => "resolving",
            SessionState::Routing => "routing",
            SessionState::Displayed => "displayed",
            SessionState::Error => "error",
        };
        f.write_str(s)
    }
}

/// Sequence number of one submit chain. Only the latest issued token may
/// change the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// The last successful route and what was shown for it.
#[derive(Debug, Clone)]
pub(crate) struct DisplayedRoute {
    pub result: RouteResult,
    pub model: DisplayModel,
}

impl DisplayedRoute {
    pub fn travel_mode(&self) -> TravelMode {
        self.model.travel_mode
    }

    pub fn unit_system(&self) -> UnitSystem {
        self.model.unit_system
    }
}

#[derive(Debug, Default)]
pub(crate) struct Session {
    latest: u64,
    state: SessionState,
    current: Option<DisplayedRoute>,
    highlight: Option<usize>,
    message: Option<String>,
}

impl Session {
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current(&self) -> Option<&DisplayedRoute> {
        self.current.as_ref()
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Issues a new token, superseding any chain in flight.
    pub fn begin(&mut self) -> RequestToken {
        self.latest += 1;
        self.state = SessionState::Resolving;
        RequestToken(self.latest)
    }

    /// Moves a live chain to `next`.
    ///
    /// # Errors
    ///
    /// [`RouteError::Stale`] when `token` has been superseded.
    pub fn advance(&mut self, token: RequestToken, next: SessionState) -> Result<(), RouteError> {
        if !self.is_current(token) {
            return Err(RouteError::Stale);
        }
        self.state = next;
        Ok(())
    }

    /// Replaces the current route wholesale and retires any highlight.
    pub fn show(&mut self, route: DisplayedRoute) {
        self.state = SessionState::Displayed;
        self.current = Some(route);
        self.highlight = None;
        self.message = None;
    }

    /// Records a failure; prior display state is dropped.
    pub fn fail(&mut self, token: RequestToken, message: String) -> Result<(), RouteError> {
        self.advance(token, SessionState::Error)?;
        self.current = None;
        self.highlight = None;
        self.message = Some(message);
        Ok(())
    }

    pub fn set_highlight(&mut self, step: usize) {
        self.highlight = Some(step);
    }

    /// Invalidates any pending chain and returns to `Idle`.
    pub fn clear(&mut self) {
        self.latest += 1;
        self.state = SessionState::Idle;
        self.current = None;
        self.highlight = None;
        self.message = None;
    }
}

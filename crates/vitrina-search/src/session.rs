//! The search box as an explicit state machine.
//!
//! The session never sleeps or performs I/O. Callers feed it events and act on
//! what it returns: a [`DebounceToken`] to hand back once the debounce window
//! closes, a [`Dispatch`] to fetch, a [`Completion`] telling whether a fetch
//! result was applied.
//!
//! Ordering guarantees rest on two counters:
//!
//! - the debounce generation, bumped by every event that restarts or cancels
//!   the debounce window; only the token of the current generation dispatches;
//! - the dispatch sequence, bumped by every dispatch; only the most recent
//!   ticket may commit results, so a slow response can never overwrite a
//!   newer one.

use std::fmt::Display;

use vitrina_core::SearchResultSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Debounce window open.
    Pending,
    Fetching,
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Short dropdown list while typing.
    Suggestions,
    /// Result grid after an explicit submit.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// A fetch the caller must perform and report back through
/// [`SearchSession::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub ticket: Ticket,
    pub query: String,
    pub mode: SearchMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// A newer dispatch exists (or the session was cleared); result dropped.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Next,
    Previous,
    Confirm,
    Dismiss,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavOutcome {
    None,
    Open(SearchResultSummary),
    Submit(Dispatch),
}

/// Read-only view of the session for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    pub query: String,
    pub phase: Phase,
    pub results: Vec<SearchResultSummary>,
    pub fetching: bool,
    pub panel_visible: bool,
    pub selected: Option<usize>,
}

impl Default for SearchSnapshot {
    fn default() -> Self {
        Self {
            query: String::new(),
            phase: Phase::Idle,
            results: Vec::new(),
            fetching: false,
            panel_visible: false,
            selected: None,
        }
    }
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug)]
pub struct SearchSession {
    query: String,
    generation: u64,
    debounce_open: bool,
    last_dispatched: Option<String>,
    sequence: u64,
    latest: Option<(Ticket, SearchMode)>,
    results: Vec<SearchResultSummary>,
    fetching: bool,
    phase: Phase,
    panel_visible: bool,
    selected: Option<usize>,
    torn_down: bool,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: String::new(),
            generation: 0,
            debounce_open: false,
            last_dispatched: None,
            sequence: 0,
            latest: None,
            results: Vec::new(),
            fetching: false,
            phase: Phase::Idle,
            panel_visible: false,
            selected: None,
            torn_down: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn results(&self) -> &[SearchResultSummary] {
        &self.results
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    #[must_use]
    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    #[must_use]
    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            query: self.query.clone(),
            phase: self.phase,
            results: self.results.clone(),
            fetching: self.fetching,
            panel_visible: self.panel_visible,
            selected: self.selected,
        }
    }

    /// Records a keystroke and restarts the debounce window.
    ///
    /// The returned token must be passed to [`Self::debounce_elapsed`] once
    /// the window closes; any later input makes it stale.
    pub fn input(&mut self, query: &str) -> DebounceToken {
        if self.torn_down {
            return DebounceToken(self.generation);
        }
        self.query = query.to_owned();
        self.generation += 1;
        self.debounce_open = true;
        self.phase = Phase::Pending;
        DebounceToken(self.generation)
    }

    /// Closes the debounce window for `token`.
    ///
    /// Returns a suggestions fetch unless the token is stale, the query did
    /// not change since the last dispatch, or the query is blank.
    pub fn debounce_elapsed(&mut self, token: DebounceToken) -> Option<Dispatch> {
        if self.torn_down || token.0 != self.generation || !self.debounce_open {
            return None;
        }
        self.debounce_open = false;

        if self.last_dispatched.as_deref() == Some(self.query.as_str()) {
            self.phase = self.resting_phase();
            return None;
        }
        self.last_dispatched = Some(self.query.clone());

        if self.query.trim().is_empty() {
            self.latest = None;
            self.fetching = false;
            self.results.clear();
            self.selected = None;
            self.panel_visible = false;
            self.phase = Phase::Idle;
            return None;
        }

        let query = self.query.clone();
        Some(self.dispatch(query, SearchMode::Suggestions))
    }

    /// Explicit search: skips the debounce window and asks for the full
    /// result view. A blank query does nothing.
    pub fn submit(&mut self, query: &str) -> Option<Dispatch> {
        if self.torn_down {
            return None;
        }
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.query = query.to_owned();
        self.generation += 1;
        self.debounce_open = false;
        self.panel_visible = false;
        Some(self.dispatch(trimmed.to_owned(), SearchMode::Full))
    }

    /// Reports the outcome of a fetch started by a [`Dispatch`].
    pub fn complete<E: Display>(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<SearchResultSummary>, E>,
    ) -> Completion {
        if self.torn_down {
            return Completion::Stale;
        }
        let Some((latest, mode)) = self.latest.filter(|(latest, _)| *latest == ticket) else {
            tracing::debug!(seq = ticket.seq(), "discarding stale search result");
            return Completion::Stale;
        };

        self.results = result.unwrap_or_else(|e| {
            tracing::warn!(seq = latest.seq(), error = %e, "search fetch failed");
            Vec::new()
        });
        self.fetching = false;
        self.selected = None;
        self.panel_visible = match mode {
            SearchMode::Suggestions => !self.results.is_empty(),
            SearchMode::Full => false,
        };
        self.phase = if self.debounce_open {
            Phase::Pending
        } else {
            Phase::Settled
        };
        Completion::Applied
    }

    pub fn focus(&mut self) {
        if !self.torn_down && !self.results.is_empty() {
            self.panel_visible = true;
        }
    }

    pub fn blur(&mut self) {
        if !self.torn_down {
            self.panel_visible = false;
        }
    }

    /// Empties the box and invalidates pending and in-flight work.
    pub fn clear(&mut self) {
        if self.torn_down {
            return;
        }
        self.query.clear();
        self.generation += 1;
        self.debounce_open = false;
        self.last_dispatched = None;
        self.latest = None;
        self.fetching = false;
        self.results.clear();
        self.panel_visible = false;
        self.selected = None;
        self.phase = Phase::Idle;
    }

    /// Keyboard handling for the suggestion panel. Keys are ignored while the
    /// panel is hidden or empty.
    pub fn navigate(&mut self, key: NavKey) -> NavOutcome {
        if self.torn_down || !self.panel_visible || self.results.is_empty() {
            return NavOutcome::None;
        }
        let last = self.results.len() - 1;
        match key {
            NavKey::Next => {
                self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(last)));
                NavOutcome::None
            }
            NavKey::Previous => {
                self.selected = self.selected.and_then(|i| i.checked_sub(1));
                NavOutcome::None
            }
            NavKey::Confirm => {
                if let Some(summary) = self.selected.and_then(|i| self.results.get(i)) {
                    return NavOutcome::Open(summary.clone());
                }
                let query = self.query.clone();
                self.submit(&query)
                    .map_or(NavOutcome::None, NavOutcome::Submit)
            }
            NavKey::Dismiss => {
                self.panel_visible = false;
                NavOutcome::None
            }
        }
    }

    /// Ends the session. Every later event is ignored.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.generation += 1;
        self.debounce_open = false;
        self.latest = None;
        self.fetching = false;
    }

    fn dispatch(&mut self, query: String, mode: SearchMode) -> Dispatch {
        self.sequence += 1;
        let ticket = Ticket(self.sequence);
        self.latest = Some((ticket, mode));
        self.fetching = true;
        self.phase = Phase::Fetching;
        tracing::debug!(seq = ticket.seq(), query = %query, ?mode, "dispatching search");
        Dispatch {
            ticket,
            query,
            mode,
        }
    }

    fn resting_phase(&self) -> Phase {
        if self.fetching {
            Phase::Fetching
        } else if self.latest.is_some() {
            Phase::Settled
        } else {
            Phase::Idle
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

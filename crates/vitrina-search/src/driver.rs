//! Runs a [`SearchSession`] on a tokio task.
//!
//! One task owns the session and processes commands and child events one at
//! a time. Debounce timers, blur timers and fetches are child tasks in a
//! [`JoinSet`]; each finishes by yielding a [`ChildEvent`] back to the loop.
//! Teardown aborts the set, but a late child event could never be applied
//! anyway: the session drops stale tokens and tickets.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinSet;
use vitrina_core::{AppConfig, SearchResultSummary};

use crate::session::{
    DebounceToken, Dispatch, NavKey, NavOutcome, SearchSession, SearchSnapshot, Ticket,
};
use crate::source::SuggestionSource;

const OPENED_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub debounce: Duration,
    pub hide_delay: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            hide_delay: Duration::from_millis(200),
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.search_debounce_ms),
            hide_delay: Duration::from_millis(config.suggestion_hide_delay_ms),
        }
    }
}

#[derive(Debug)]
enum Command {
    Input(String),
    Submit(String),
    Focus,
    Blur,
    Clear,
    Navigate(NavKey),
    Shutdown,
}

enum ChildEvent<E> {
    DebounceElapsed(DebounceToken),
    HideElapsed(u64),
    Completed(Ticket, Result<Vec<SearchResultSummary>, E>),
}

/// Caller side of a running search session.
///
/// Cloning shares the session. When the last clone is dropped the session is
/// torn down.
#[derive(Debug, Clone)]
pub struct SearchHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<SearchSnapshot>,
    opened: broadcast::Sender<SearchResultSummary>,
}

impl SearchHandle {
    pub fn input(&self, query: impl Into<String>) {
        self.send(Command::Input(query.into()));
    }

    pub fn submit(&self, query: impl Into<String>) {
        self.send(Command::Submit(query.into()));
    }

    pub fn focus(&self) {
        self.send(Command::Focus);
    }

    /// Hides the suggestion panel after the configured delay, unless the box
    /// is focused again first.
    pub fn blur(&self) {
        self.send(Command::Blur);
    }

    pub fn clear(&self) {
        self.send(Command::Clear);
    }

    pub fn navigate(&self, key: NavKey) {
        self.send(Command::Navigate(key));
    }

    /// Stops the session: pending timers and in-flight fetches are aborted
    /// and no further snapshot is published.
    pub fn shutdown(&self) {
        self.send(Command::Shutdown);
    }

    /// Latest published state. The sender side is dropped at teardown, so
    /// `changed()` then returns an error.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.snapshots.clone()
    }

    /// Products the user opened from the suggestion panel.
    #[must_use]
    pub fn opened(&self) -> broadcast::Receiver<SearchResultSummary> {
        self.opened.subscribe()
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            tracing::debug!("search session already torn down");
        }
    }
}

pub struct SearchDriver<S: SuggestionSource> {
    source: Arc<S>,
    config: SearchConfig,
    session: SearchSession,
    tasks: JoinSet<ChildEvent<S::Error>>,
    hide_generation: u64,
    snapshots: watch::Sender<SearchSnapshot>,
    opened: broadcast::Sender<SearchResultSummary>,
}

impl<S: SuggestionSource> SearchDriver<S> {
    /// Spawns the session task on the current tokio runtime.
    #[must_use]
    pub fn spawn(source: S, config: SearchConfig) -> SearchHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(SearchSnapshot::default());
        let (opened_tx, _) = broadcast::channel(OPENED_CAPACITY);

        let driver = Self {
            source: Arc::new(source),
            config,
            session: SearchSession::new(),
            tasks: JoinSet::new(),
            hide_generation: 0,
            snapshots: snapshot_tx,
            opened: opened_tx.clone(),
        };
        tokio::spawn(driver.run(command_rx));

        SearchHandle {
            commands: command_tx,
            snapshots: snapshot_rx,
            opened: opened_tx,
        }
    }

    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    match joined {
                        Ok(event) => self.handle_child(event),
                        Err(e) if e.is_cancelled() => {}
                        Err(e) => tracing::warn!(error = %e, "search child task failed"),
                    }
                }
            }
            self.publish();
        }

        self.session.teardown();
        self.tasks.abort_all();
        tracing::debug!("search session torn down");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Input(query) => {
                let token = self.session.input(&query);
                let debounce = self.config.debounce;
                self.tasks.spawn(async move {
                    tokio::time::sleep(debounce).await;
                    ChildEvent::DebounceElapsed(token)
                });
            }
            Command::Submit(query) => {
                if let Some(dispatch) = self.session.submit(&query) {
                    self.start_fetch(dispatch);
                }
            }
            Command::Focus => {
                self.hide_generation += 1;
                self.session.focus();
            }
            Command::Blur => {
                self.hide_generation += 1;
                let generation = self.hide_generation;
                let delay = self.config.hide_delay;
                self.tasks.spawn(async move {
                    tokio::time::sleep(delay).await;
                    ChildEvent::HideElapsed(generation)
                });
            }
            Command::Clear => self.session.clear(),
            Command::Navigate(key) => match self.session.navigate(key) {
                NavOutcome::None => {}
                NavOutcome::Open(summary) => {
                    tracing::debug!(product_id = %summary.id, "opening product from suggestions");
                    // Err only means nobody subscribed.
                    let _ = self.opened.send(summary);
                }
                NavOutcome::Submit(dispatch) => self.start_fetch(dispatch),
            },
            Command::Shutdown => {}
        }
    }

    fn handle_child(&mut self, event: ChildEvent<S::Error>) {
        match event {
            ChildEvent::DebounceElapsed(token) => {
                if let Some(dispatch) = self.session.debounce_elapsed(token) {
                    self.start_fetch(dispatch);
                }
            }
            ChildEvent::HideElapsed(generation) => {
                if generation == self.hide_generation {
                    self.session.blur();
                }
            }
            ChildEvent::Completed(ticket, result) => {
                self.session.complete(ticket, result);
            }
        }
    }

    fn start_fetch(&mut self, dispatch: Dispatch) {
        let source = Arc::clone(&self.source);
        self.tasks.spawn(async move {
            let result = source.search(&dispatch.query, dispatch.mode).await;
            ChildEvent::Completed(dispatch.ticket, result)
        });
    }

    fn publish(&self) {
        let snapshot = self.session.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}

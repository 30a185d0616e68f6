//! Debounced, race-safe search suggestions.
//!
//! [`SearchSession`] is the pure state machine; [`SearchDriver`] runs it on a
//! tokio task with real timers and fetches.

pub mod driver;
pub mod session;
pub mod source;

pub use driver::{SearchConfig, SearchDriver, SearchHandle};
pub use session::{
    Completion, DebounceToken, Dispatch, NavKey, NavOutcome, Phase, SearchMode, SearchSession,
    SearchSnapshot, Ticket,
};
pub use source::SuggestionSource;

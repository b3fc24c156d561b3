//! Debounced search input.
//!
//! The search bar edits a local draft. The draft reaches the query store only
//! after the operator stops typing for the quiescence window, so a burst of
//! keystrokes produces a single recomputation of the derived view.
//!
//! # Timers
//!
//! Zellij timers (`set_timeout`) cannot be cancelled once scheduled. Instead of
//! cancelling, [`SearchCoordinator`] counts the timers it has in flight: every
//! edit schedules one more, every `Timer` event retires one, and the draft is
//! committed only when the last outstanding timer fires. Timers belonging to
//! superseded edits therefore retire silently, and a commit can never be
//! applied out of order.
//!
//! ```text
//! edit 'j' ──► timer #1 ─────┐
//! edit 'o' ──► timer #2 ───┐ │
//!                          │ └─► fires: 1 in flight, no commit
//!                          └───► fires: 0 in flight, commit "jo"
//! ```

use std::time::Duration;

/// Default quiescence window between the last keystroke and the commit.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Draft state of the search input and its pending commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCoordinator {
    draft: String,
    window: Duration,
    timers_in_flight: usize,
    commit_pending: bool,
}

impl Default for SearchCoordinator {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SearchCoordinator {
    /// Creates an idle coordinator with an empty draft.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            draft: String::new(),
            window,
            timers_in_flight: 0,
            commit_pending: false,
        }
    }

    /// Appends a character to the draft.
    ///
    /// Returns the delay the caller must schedule a timer for.
    pub fn push_char(&mut self, c: char) -> Duration {
        self.draft.push(c);
        self.schedule()
    }

    /// Removes the last character of the draft.
    ///
    /// Returns `None` when the draft was already empty, since nothing changed.
    pub fn backspace(&mut self) -> Option<Duration> {
        self.draft.pop()?;
        Some(self.schedule())
    }

    /// Retires one in-flight timer.
    ///
    /// Returns the text to commit when this was the last outstanding timer and
    /// a commit is still pending.
    pub fn on_timer(&mut self) -> Option<String> {
        self.timers_in_flight = self.timers_in_flight.saturating_sub(1);

        if self.timers_in_flight > 0 || !self.commit_pending {
            tracing::trace!(
                in_flight = self.timers_in_flight,
                pending = self.commit_pending,
                "debounce timer superseded"
            );
            return None;
        }

        self.commit_pending = false;
        Some(self.draft.clone())
    }

    /// Empties the draft and drops any pending commit.
    ///
    /// The caller commits the empty text itself, without waiting.
    pub fn clear(&mut self) {
        self.draft.clear();
        self.commit_pending = false;
    }

    /// Mirrors a search text committed from elsewhere into the draft.
    pub fn resync(&mut self, committed: &str) {
        if self.draft != committed {
            tracing::trace!(draft = %self.draft, committed = %committed, "search draft resynced");
        }
        self.draft.clear();
        self.draft.push_str(committed);
        self.cancel();
    }

    /// Drops the pending commit.
    ///
    /// In-flight timers stay counted so that they retire without effect when
    /// they eventually fire.
    pub fn cancel(&mut self) {
        self.commit_pending = false;
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.commit_pending
    }

    #[must_use]
    pub const fn timers_in_flight(&self) -> usize {
        self.timers_in_flight
    }

    fn schedule(&mut self) -> Duration {
        self.timers_in_flight += 1;
        self.commit_pending = true;
        self.window
    }
}

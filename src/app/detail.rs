//! Detail overlay for a single user.
//!
//! While the overlay is open the table behind it must not scroll: row and page
//! navigation are suppressed. The suppression is a shared [`ScrollLock`] flag
//! held through a [`ScrollLockGuard`]. The guard lives inside [`DetailView`]
//! and clears the flag when dropped, so every way of closing the overlay
//! releases it, including dropping the whole plugin state.

use std::cell::Cell;
use std::rc::Rc;

/// Shared flag telling navigation handlers that background scrolling is locked.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock(Rc<Cell<bool>>);

impl ScrollLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks background scrolling until the returned guard is dropped.
    #[must_use]
    pub fn acquire(&self) -> ScrollLockGuard {
        self.0.set(true);
        tracing::trace!("scroll lock acquired");
        ScrollLockGuard {
            flag: Rc::clone(&self.0),
        }
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.0.get()
    }
}

/// Scoped hold on a [`ScrollLock`].
#[derive(Debug)]
pub struct ScrollLockGuard {
    flag: Rc<Cell<bool>>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.flag.set(false);
        tracing::trace!("scroll lock released");
    }
}

/// How the overlay was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The overlay's own close control (`q`).
    CloseButton,
    /// A click outside the overlay frame.
    Backdrop,
    /// The Escape key.
    Escape,
    /// Session restart or plugin teardown.
    Teardown,
}

/// Open/closed state of the detail overlay.
///
/// The displayed record itself lives in the query store as the selected user;
/// this type only owns the scroll lock for as long as the overlay is visible.
#[derive(Debug, Default)]
pub struct DetailView {
    guard: Option<ScrollLockGuard>,
}

impl DetailView {
    /// Shows the overlay. Opening an already open overlay keeps the current hold.
    pub fn open(&mut self, lock: &ScrollLock) {
        if self.guard.is_none() {
            self.guard = Some(lock.acquire());
        }
    }

    /// Hides the overlay and releases the scroll lock.
    ///
    /// Returns whether the overlay was open.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        let was_open = self.guard.take().is_some();
        if was_open {
            tracing::debug!(reason = ?reason, "detail view closed");
        }
        was_open
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.guard.is_some()
    }
}

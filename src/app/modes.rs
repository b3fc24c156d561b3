//! Input mode state machine.
//!
//! The mode decides how a key press is interpreted:
//!
//! - **Normal**: table navigation, paging and commands
//! - **Search**: keystrokes edit the search draft
//! - **`CityPicker`**: `j`/`k` move through the city list, Enter applies it
//!
//! The detail overlay is not a mode. It is tracked by
//! [`DetailView`](super::detail::DetailView) and takes precedence over all
//! three.

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default navigation and command mode.
    ///
    /// Keybindings: j/k (rows), h/l (pages), 1-9 (go to page), / (search),
    /// f (city), C (clear filters), x/X (export), Enter (details), q (quit).
    #[default]
    Normal,

    /// The search bar has focus.
    ///
    /// Printable keys edit the draft; Enter or Esc hand focus back.
    Search,

    /// The city picker is open.
    ///
    /// `cursor` indexes the option list, where 0 is "All Cities".
    CityPicker {
        /// Highlighted option.
        cursor: usize,
    },
}

//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data.

/// Which of the mutually exclusive page compositions is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// The user fetch is in flight.
    Loading,
    /// The user fetch failed.
    Failed,
    /// Filters are active and nothing matches.
    NoMatches,
    /// The current page holds no rows.
    EmptyPage,
    /// Table with at least one row.
    Normal,
}

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Page composition to render.
    pub state: PageState,

    /// Title and summary line.
    pub header: HeaderInfo,

    /// Search input and active city filter; absent while loading or failed.
    pub search_bar: Option<SearchBarInfo>,

    /// Rows of the current page.
    pub display_items: Vec<DisplayItem>,

    /// Centered message replacing the table.
    pub empty_state: Option<EmptyState>,

    /// Page controls; absent when everything fits on one page.
    pub pager: Option<PagerInfo>,

    /// City picker overlay, when open.
    pub city_picker: Option<CityPickerInfo>,

    /// Detail overlay, when open.
    pub detail: Option<DetailInfo>,

    /// Keybinding hints and the latest notice.
    pub footer: FooterInfo,
}

/// One row of the users table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub name: String,
    pub email: String,
    pub company: String,
    pub city: String,

    /// Whether the row cursor is on this item.
    pub is_selected: bool,

    /// Character ranges of `name` matching the committed search text.
    pub name_highlights: Vec<(usize, usize)>,

    /// Character ranges of `email` matching the committed search text.
    pub email_highlights: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,

    /// Secondary line, e.g. `Total: 10 users • Showing: 5 users`.
    pub subtitle: Option<String>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the current input mode.
    pub keybindings: String,

    /// Latest export result or error.
    pub notice: Option<NoticeInfo>,
}

/// Transient status line shown above the keybindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeInfo {
    pub text: String,
    pub is_error: bool,
}

/// Centered message shown instead of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message (e.g., "No users found").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,

    /// Recovery keybinding, e.g. `r: reload`.
    pub hint: Option<String>,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Current draft text, which may run ahead of the committed search.
    pub query: String,

    /// Whether keystrokes edit the query.
    pub is_focused: bool,

    /// Label of the city filter control.
    pub city_label: String,
}

/// Page controls under the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerInfo {
    /// `Showing page X of Y • N users`.
    pub summary: String,

    /// Page numbers with the current one marked.
    pub pages: Vec<(usize, bool)>,

    pub has_previous: bool,
    pub has_next: bool,
}

/// City picker overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityPickerInfo {
    /// `All Cities (N)` followed by each distinct city.
    pub options: Vec<String>,

    /// Highlighted option.
    pub cursor: usize,

    /// Option matching the active filter.
    pub active: usize,
}

/// Detail overlay for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub title: String,
    pub subtitle: String,

    /// Labelled sections, each a list of lines.
    pub sections: Vec<(String, Vec<String>)>,

    /// `User ID: n`.
    pub footer: String,
}

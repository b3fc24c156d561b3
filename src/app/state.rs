//! Application state management and view model computation.
//!
//! [`AppState`] ties the query store to the interaction state around it: the
//! debounced search draft, the input mode, the row cursor, the detail overlay
//! and the latest notice. It is the single value the plugin shim owns.
//!
//! # State Components
//!
//! - **Store**: loaded users and committed query parameters ([`QueryStore`])
//! - **Search**: draft text and pending commit ([`SearchCoordinator`])
//! - **Input Mode**: controls keybinding interpretation ([`InputMode`])
//! - **Row Cursor**: highlighted row within the current page
//! - **Detail**: overlay visibility and the scroll lock it holds
//! - **Notice**: outcome of the last export
//!
//! # View Model Computation
//!
//! `compute_viewmodel` derives everything the renderer needs from a state
//! snapshot. Nothing derived is cached between frames.

use super::actions::Action;
use super::detail::{CloseReason, DetailView, ScrollLock};
use super::modes::InputMode;
use super::pager::Pager;
use super::search::{SearchCoordinator, DEFAULT_DEBOUNCE};
use crate::domain::{LoadError, UserRecord};
use crate::export::EmptyExportPolicy;
use crate::infrastructure::HOST_ROOT;
use crate::query::{DerivedView, LoadStatus, QueryStore};
use crate::remote::DEFAULT_ENDPOINT;
use crate::ui::helpers::{column_widths, match_ranges, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CityPickerInfo, DetailInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo, NoticeInfo,
    PageState, PagerInfo, SearchBarInfo, UIViewModel,
};
use std::time::Duration;

/// Lines used by everything except table rows.
const CHROME_ROWS: usize = 15;

/// Runtime settings resolved from the plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// URL of the user directory.
    pub endpoint: String,

    /// Sandbox directory exports are written to.
    pub export_dir: String,

    /// What an export contains when nothing matches the filters.
    pub export_policy: EmptyExportPolicy,

    /// Quiescence window of the search input.
    pub debounce: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            export_dir: HOST_ROOT.to_string(),
            export_policy: EmptyExportPolicy::default(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Transient status message shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// Central application state container.
///
/// Mutated by the event handler in response to user input and host events.
/// View models are computed on demand from state snapshots.
#[derive(Debug)]
pub struct AppState {
    /// Loaded users and committed query parameters.
    pub store: QueryStore,

    /// Search draft and its debounced commit.
    pub search: SearchCoordinator,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Zero-based row within the current page.
    ///
    /// Clamped to the page after every change that can shrink it.
    pub row_cursor: usize,

    /// Detail overlay; holds the scroll lock while open.
    pub detail: DetailView,

    /// Flag suppressing table navigation behind the overlay.
    pub scroll_lock: ScrollLock,

    /// Color scheme for UI rendering.
    pub theme: Theme,

    /// Outcome of the last export, if any.
    pub notice: Option<Notice>,

    /// Resolved configuration.
    pub settings: Settings,

    /// Answer to the web access permission request; `None` until it arrives.
    pub web_access: Option<bool>,
}

impl AppState {
    /// Creates a session in the `Loading` state.
    ///
    /// The fetch is not issued until web access is granted.
    #[must_use]
    pub fn new(theme: Theme, settings: Settings) -> Self {
        Self {
            store: QueryStore::new(),
            search: SearchCoordinator::new(settings.debounce),
            input_mode: InputMode::Normal,
            row_cursor: 0,
            detail: DetailView::default(),
            scroll_lock: ScrollLock::new(),
            theme,
            notice: None,
            settings,
            web_access: None,
        }
    }

    /// Claims the session's load and returns the fetch to issue, if any.
    pub fn start(&mut self) -> Vec<Action> {
        if !self.store.begin_load() {
            return vec![];
        }
        tracing::debug!(url = %self.settings.endpoint, "requesting users");
        vec![Action::FetchUsers {
            url: self.settings.endpoint.clone(),
        }]
    }

    /// Fails the load because web access was refused.
    pub fn deny_web_access(&mut self) {
        self.web_access = Some(false);
        self.store.begin_load();
        self.store.finish_load(Err(LoadError::PermissionDenied));
    }

    /// Discards the whole session and starts a new one.
    ///
    /// The overlay is torn down, the query state is rebuilt from scratch and
    /// the one-shot load is issued again. Debounce timers still in flight keep
    /// being counted so they cannot commit into the new session.
    pub fn restart(&mut self) -> Vec<Action> {
        tracing::info!("restarting session");

        self.detail.close(CloseReason::Teardown);
        self.store = QueryStore::new();
        self.search.resync("");
        self.input_mode = InputMode::Normal;
        self.row_cursor = 0;
        self.notice = None;

        if self.web_access == Some(true) {
            self.start()
        } else {
            vec![Action::RequestPermissions]
        }
    }

    /// Returns the user under the row cursor.
    #[must_use]
    pub fn selected_row_user(&self) -> Option<&UserRecord> {
        self.store.derived().paged_users.get(self.row_cursor).copied()
    }

    /// Returns the pager snapshot for the current page.
    #[must_use]
    pub fn pager(&self) -> Pager {
        Pager::new(self.store.page(), self.store.derived().page_count)
    }

    /// Whether the city control accepts input.
    #[must_use]
    pub fn city_filter_enabled(&self) -> bool {
        self.store.is_ready() && !self.store.raw_users().is_empty()
    }

    /// Number of options in the city picker, including "All Cities".
    #[must_use]
    pub fn city_option_count(&self) -> usize {
        self.store.derived().distinct_cities.len() + 1
    }

    /// Index of the picker option matching the active filter.
    #[must_use]
    pub fn active_city_option(&self) -> usize {
        let city = self.store.city_filter();
        if city.is_empty() {
            return 0;
        }
        self.store
            .derived()
            .distinct_cities
            .iter()
            .position(|c| *c == city)
            .map_or(0, |i| i + 1)
    }

    /// Returns the city for picker option `index`; empty for "All Cities".
    #[must_use]
    pub fn city_option(&self, index: usize) -> Option<String> {
        if index == 0 {
            return Some(String::new());
        }
        self.store
            .derived()
            .distinct_cities
            .get(index - 1)
            .map(|c| (*c).to_string())
    }

    /// Moves the row cursor down, wrapping to the top.
    pub fn move_row_down(&mut self) {
        let len = self.store.derived().paged_users.len();
        if len == 0 {
            return;
        }
        self.row_cursor = (self.row_cursor + 1) % len;
    }

    /// Moves the row cursor up, wrapping to the bottom.
    pub fn move_row_up(&mut self) {
        let len = self.store.derived().paged_users.len();
        if len == 0 {
            return;
        }
        self.row_cursor = if self.row_cursor == 0 {
            len - 1
        } else {
            self.row_cursor - 1
        };
    }

    /// Keeps the row cursor inside the current page.
    pub fn clamp_row_cursor(&mut self) {
        let len = self.store.derived().paged_users.len();
        self.row_cursor = self.row_cursor.min(len.saturating_sub(1));
    }

    /// Computes a renderable view model for a pane of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel", rows, cols).entered();

        let view = self.store.derived();
        let state = self.page_state(&view);

        let display_items = if state == PageState::Normal {
            self.compute_display_items(&view, rows, cols)
        } else {
            vec![]
        };

        UIViewModel {
            state,
            header: Self::compute_header(state, &view),
            search_bar: self.compute_search_bar(state, &view),
            display_items,
            empty_state: self.compute_empty_state(state),
            pager: (state == PageState::Normal)
                .then(|| Self::compute_pager(self.store.page(), &view))
                .flatten(),
            city_picker: self.compute_city_picker(&view),
            detail: self.compute_detail(),
            footer: self.compute_footer(state),
        }
    }

    fn page_state(&self, view: &DerivedView<'_>) -> PageState {
        match self.store.status() {
            LoadStatus::Loading => PageState::Loading,
            LoadStatus::Failed(_) => PageState::Failed,
            LoadStatus::Ready if view.total_matches == 0 && self.store.has_filters() => {
                PageState::NoMatches
            }
            LoadStatus::Ready if view.paged_users.is_empty() => PageState::EmptyPage,
            LoadStatus::Ready => PageState::Normal,
        }
    }

    fn compute_header(state: PageState, view: &DerivedView<'_>) -> HeaderInfo {
        let subtitle = matches!(state, PageState::Normal | PageState::EmptyPage).then(|| {
            format!(
                "Total: {} users • Showing: {} users",
                view.total_matches,
                view.paged_users.len()
            )
        });

        HeaderInfo {
            title: "Users Management".to_string(),
            subtitle,
        }
    }

    fn compute_search_bar(&self, state: PageState, view: &DerivedView<'_>) -> Option<SearchBarInfo> {
        if state == PageState::Failed {
            return None;
        }

        let city_label = if !self.store.is_ready() {
            "Loading cities...".to_string()
        } else if self.store.city_filter().is_empty() {
            format!("All Cities ({})", view.distinct_cities.len())
        } else {
            format!("City: {}", self.store.city_filter())
        };

        Some(SearchBarInfo {
            query: self.search.draft().to_string(),
            is_focused: self.input_mode == InputMode::Search,
            city_label,
        })
    }

    fn compute_display_items(&self, view: &DerivedView<'_>, rows: usize, cols: usize) -> Vec<DisplayItem> {
        let available = rows.saturating_sub(CHROME_ROWS).max(1);
        let start = self.row_cursor.saturating_sub(available - 1);
        let widths = column_widths(cols);
        let query = self.store.search_text();

        view.paged_users
            .iter()
            .enumerate()
            .skip(start)
            .take(available)
            .map(|(index, user)| {
                let name = truncate(&user.name, widths.name);
                let email = truncate(&user.email, widths.email);
                DisplayItem {
                    name_highlights: match_ranges(&name, query),
                    email_highlights: match_ranges(&email, query),
                    name,
                    email,
                    company: truncate(&user.company.name, widths.company),
                    city: truncate(user.city(), widths.city),
                    is_selected: index == self.row_cursor,
                }
            })
            .collect()
    }

    fn compute_empty_state(&self, state: PageState) -> Option<EmptyState> {
        let (message, subtitle, hint) = match state {
            PageState::Normal => return None,
            PageState::Loading => ("Loading users data...", "Please wait a moment", None),
            PageState::Failed => (
                "Error Loading Data",
                self.store.error_message().unwrap_or_default(),
                Some("r: reload"),
            ),
            PageState::NoMatches => (
                "No users found",
                "No users match your search criteria. Try adjusting your filters.",
                Some("C: clear all filters"),
            ),
            PageState::EmptyPage => (
                "No users in current page",
                "",
                (self.store.page() > 1).then_some("h: previous page"),
            ),
        };

        Some(EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
            hint: hint.map(str::to_string),
        })
    }

    fn compute_pager(page: usize, view: &DerivedView<'_>) -> Option<PagerInfo> {
        let pager = Pager::new(page, view.page_count);
        if !pager.is_visible() {
            return None;
        }

        Some(PagerInfo {
            summary: format!(
                "Showing page {} of {} • {} users",
                page, view.page_count, view.total_matches
            ),
            pages: (1..=view.page_count).map(|n| (n, n == page)).collect(),
            has_previous: pager.previous().is_some(),
            has_next: pager.next().is_some(),
        })
    }

    fn compute_city_picker(&self, view: &DerivedView<'_>) -> Option<CityPickerInfo> {
        let InputMode::CityPicker { cursor } = self.input_mode else {
            return None;
        };

        let options = std::iter::once(format!("All Cities ({})", view.distinct_cities.len()))
            .chain(view.distinct_cities.iter().map(|c| (*c).to_string()))
            .collect();

        Some(CityPickerInfo {
            options,
            cursor,
            active: self.active_city_option(),
        })
    }

    fn compute_detail(&self) -> Option<DetailInfo> {
        if !self.detail.is_open() {
            return None;
        }
        let user = self.store.selected_user()?;
        let address = &user.address;

        Some(DetailInfo {
            title: user.name.clone(),
            subtitle: user.email.clone(),
            sections: vec![
                (
                    "Personal Info".to_string(),
                    vec![
                        format!("Phone: {}", user.phone),
                        format!("Website: {}", user.website),
                    ],
                ),
                (
                    "Address".to_string(),
                    vec![
                        address.street.clone(),
                        address.suite.clone(),
                        format!("{}, {}", address.city, address.zipcode),
                    ],
                ),
                (
                    "Company".to_string(),
                    vec![
                        user.company.name.clone(),
                        format!("\"{}\"", user.company.catch_phrase),
                        user.company.bs.clone(),
                    ],
                ),
            ],
            footer: format!("User ID: {}", user.id),
        })
    }

    fn compute_footer(&self, state: PageState) -> FooterInfo {
        let keybindings = if self.detail.is_open() {
            "Esc/q: close  click outside: close"
        } else {
            match (self.input_mode, state) {
                (InputMode::Search, _) => "Type to search  Enter/Esc: done  Ctrl+u: clear",
                (InputMode::CityPicker { .. }, _) => "j/k: move  Enter: apply  Esc: cancel",
                (InputMode::Normal, PageState::Loading) => "q: quit",
                (InputMode::Normal, PageState::Failed) => "r: reload  q: quit",
                (InputMode::Normal, PageState::NoMatches) => {
                    "C: clear filters  /: search  f: city  x/X: export  q: quit"
                }
                (InputMode::Normal, PageState::EmptyPage | PageState::Normal) => {
                    "j/k: rows  h/l: pages  Enter: details  /: search  f: city  C: clear  x/X: export csv/json  q: quit"
                }
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
            notice: self.notice.as_ref().map(|n| NoticeInfo {
                text: n.text.clone(),
                is_error: n.is_error,
            }),
        }
    }
}

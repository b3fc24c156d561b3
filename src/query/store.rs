//! Session-wide query state and its intents.
//!
//! [`QueryStore`] is the single source of truth for the loaded user list and
//! the operator's query parameters. It stores only inputs; everything derived
//! comes from [`QueryStore::derived`], which is recomputed on each read and
//! therefore always reflects the latest committed state.
//!
//! # Page reset
//!
//! Changing the search text or the city filter resets the page to 1 inside
//! the same call, so no control can leave the store on a page that belonged
//! to a previous filter.

use super::derive::DerivedView;
use crate::domain::{LoadError, UserRecord};

/// Number of users per page.
pub const PAGE_SIZE: usize = 5;

/// Message shown for every load failure.
pub const LOAD_FAILED_MESSAGE: &str = "Something went wrong";

/// Lifecycle of the one-shot user load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The fetch has not completed yet.
    Loading,
    /// Users are loaded and queryable.
    Ready,
    /// The fetch failed; carries the user-facing message.
    Failed(String),
}

/// Raw data and query parameters for one dashboard session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryStore {
    raw_users: Vec<UserRecord>,
    status: LoadStatus,
    load_requested: bool,
    search_text: String,
    city_filter: String,
    page: usize,
    page_size: usize,
    selected_user: Option<UserRecord>,
}

impl Default for QueryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryStore {
    /// Creates an empty store in the `Loading` state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            raw_users: Vec::new(),
            status: LoadStatus::Loading,
            load_requested: false,
            search_text: String::new(),
            city_filter: String::new(),
            page: 1,
            page_size: PAGE_SIZE,
            selected_user: None,
        }
    }

    /// Claims the session's single load.
    ///
    /// Returns `true` the first time it is called, meaning the caller must
    /// issue the fetch now. Every later call returns `false`.
    pub fn begin_load(&mut self) -> bool {
        if self.load_requested {
            tracing::debug!("load already requested for this session");
            return false;
        }
        self.load_requested = true;
        tracing::debug!("user load started");
        true
    }

    /// Applies the outcome of the fetch.
    ///
    /// Outcomes arriving after the store left `Loading` are ignored.
    pub fn finish_load(&mut self, outcome: Result<Vec<UserRecord>, LoadError>) {
        if self.status != LoadStatus::Loading {
            tracing::debug!(status = ?self.status, "ignoring late load outcome");
            return;
        }

        match outcome {
            Ok(users) => {
                tracing::info!(user_count = users.len(), "users loaded");
                self.raw_users = users;
                self.status = LoadStatus::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "user load failed");
                self.status = LoadStatus::Failed(LOAD_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Replaces the search text verbatim and returns to page 1.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.page = 1;
        tracing::debug!(query = %self.search_text, "search text committed");
    }

    /// Replaces the city filter (empty clears it) and returns to page 1.
    pub fn set_city_filter(&mut self, city: impl Into<String>) {
        self.city_filter = city.into();
        self.page = 1;
        tracing::debug!(city = %self.city_filter, "city filter set");
    }

    /// Resets search text, city filter and page in one transition.
    pub fn clear_filters(&mut self) {
        self.search_text.clear();
        self.city_filter.clear();
        self.page = 1;
        tracing::debug!("filters cleared");
    }

    /// Moves to page `n`.
    ///
    /// Values past the last page are accepted and produce an empty page;
    /// zero is raised to 1.
    pub fn set_page(&mut self, n: usize) {
        self.page = n.max(1);
    }

    /// Replaces the record shown in the detail view.
    pub fn set_selected_user(&mut self, user: Option<UserRecord>) {
        self.selected_user = user;
    }

    /// Recomputes every derived value from the current inputs.
    #[must_use]
    pub fn derived(&self) -> DerivedView<'_> {
        DerivedView::compute(
            &self.raw_users,
            &self.search_text,
            &self.city_filter,
            self.page,
            self.page_size,
        )
    }

    #[must_use]
    pub fn raw_users(&self) -> &[UserRecord] {
        &self.raw_users
    }

    #[must_use]
    pub const fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Returns the failure message; `Some` only when the load failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            LoadStatus::Loading | LoadStatus::Ready => None,
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }

    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    #[must_use]
    pub fn city_filter(&self) -> &str {
        &self.city_filter
    }

    /// Returns whether a search text or a city restriction is active.
    #[must_use]
    pub fn has_filters(&self) -> bool {
        !self.search_text.is_empty() || !self.city_filter.is_empty()
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub const fn selected_user(&self) -> Option<&UserRecord> {
        self.selected_user.as_ref()
    }
}

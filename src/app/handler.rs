//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single place where [`AppState`] changes. Events come
//! from key presses and clicks (mapped in the plugin shim), host events (fetch
//! result, timers, permissions) and worker responses. Each call returns
//! whether a redraw is needed and the side effects to execute.
//!
//! # Event Types
//!
//! - **Table**: `RowDown`, `RowUp`, `PreviousPage`, `NextPage`, `GoToPage`
//! - **Detail**: `OpenDetail`, `CloseDetail`
//! - **Search**: `FocusSearch`, `Char`, `Backspace`, `ClearSearch`, `BlurSearch`,
//!   `DebounceElapsed`
//! - **City**: `OpenCityPicker`, `PickerDown`, `PickerUp`, `ConfirmCity`,
//!   `CancelPicker`
//! - **Commands**: `ClearFilters`, `Export`, `Reload`, `CloseFocus`
//! - **Host**: `PermissionsResult`, `UsersFetched`, `WorkerResponse`
//!
//! # Example
//!
//! ```rust
//! use userdeck::app::{handle_event, AppState, Event, Settings};
//! use userdeck::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), Settings::default());
//! let (_redraw, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), userdeck::UserdeckError>(())
//! ```

use super::actions::Action;
use super::detail::CloseReason;
use super::modes::InputMode;
use super::state::{AppState, Notice};
use crate::domain::{LoadError, Result, UserRecord};
use crate::export::{build_export, ExportFormat};
use crate::query::LoadStatus;
use crate::worker::{WorkerMessage, WorkerResponse};

/// Events triggered by user input, host callbacks, or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the row cursor down (wraps to top).
    RowDown,
    /// Moves the row cursor up (wraps to bottom).
    RowUp,
    PreviousPage,
    NextPage,
    /// Jumps to a page by number; out-of-range numbers are ignored.
    GoToPage(usize),

    /// Opens the detail overlay for the row under the cursor.
    OpenDetail,
    CloseDetail(CloseReason),

    /// Gives the search bar focus.
    FocusSearch,
    /// Appends a character to the search draft.
    Char(char),
    /// Removes the last character of the search draft.
    Backspace,
    /// Empties the search and commits immediately.
    ClearSearch,
    /// Hands focus back to the table, keeping the draft.
    BlurSearch,
    /// A debounce timer fired.
    DebounceElapsed,

    OpenCityPicker,
    PickerDown,
    PickerUp,
    /// Applies the highlighted city.
    ConfirmCity,
    CancelPicker,

    /// Resets search text, city filter and page together.
    ClearFilters,
    /// Shapes an export of the current view and hands it to the worker.
    Export(ExportFormat),
    /// Restarts the session from the failed state.
    Reload,
    /// Hides the plugin pane.
    CloseFocus,

    /// Answer to the web access permission request.
    PermissionsResult {
        granted: bool,
    },

    /// Outcome of the one-shot user fetch.
    UsersFetched(std::result::Result<Vec<UserRecord>, LoadError>),

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Short name used as the span field, so payloads stay out of traces.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RowDown => "row_down",
            Self::RowUp => "row_up",
            Self::PreviousPage => "previous_page",
            Self::NextPage => "next_page",
            Self::GoToPage(_) => "go_to_page",
            Self::OpenDetail => "open_detail",
            Self::CloseDetail(_) => "close_detail",
            Self::FocusSearch => "focus_search",
            Self::Char(_) => "char",
            Self::Backspace => "backspace",
            Self::ClearSearch => "clear_search",
            Self::BlurSearch => "blur_search",
            Self::DebounceElapsed => "debounce_elapsed",
            Self::OpenCityPicker => "open_city_picker",
            Self::PickerDown => "picker_down",
            Self::PickerUp => "picker_up",
            Self::ConfirmCity => "confirm_city",
            Self::CancelPicker => "cancel_picker",
            Self::ClearFilters => "clear_filters",
            Self::Export(_) => "export",
            Self::Reload => "reload",
            Self::CloseFocus => "close_focus",
            Self::PermissionsResult { .. } => "permissions_result",
            Self::UsersFetched(_) => "users_fetched",
            Self::WorkerResponse(_) => "worker_response",
        }
    }

    /// Whether the event scrolls the table behind the detail overlay.
    const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::RowDown | Self::RowUp | Self::PreviousPage | Self::NextPage | Self::GoToPage(_)
        )
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(redraw, actions)`: whether the pane must be re-rendered and the side
/// effects to run, in order.
///
/// # Errors
///
/// Returns an error if an export cannot be encoded.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.kind()).entered();

    if event.is_navigation() && state.scroll_lock.is_locked() {
        tracing::trace!("navigation suppressed behind detail overlay");
        return Ok((false, vec![]));
    }

    match event {
        Event::RowDown => {
            state.move_row_down();
            Ok((true, vec![]))
        }
        Event::RowUp => {
            state.move_row_up();
            Ok((true, vec![]))
        }
        Event::PreviousPage => {
            let target = state.pager().previous();
            Ok((go_to(state, target), vec![]))
        }
        Event::NextPage => {
            let target = state.pager().next();
            Ok((go_to(state, target), vec![]))
        }
        Event::GoToPage(n) => {
            let target = state.pager().select(*n);
            Ok((go_to(state, target), vec![]))
        }

        Event::OpenDetail => {
            let Some(user) = state.selected_row_user().cloned() else {
                tracing::debug!("no row under cursor");
                return Ok((false, vec![]));
            };
            tracing::debug!(user_id = user.id, "opening detail");
            state.store.set_selected_user(Some(user));
            state.detail.open(&state.scroll_lock);
            Ok((true, vec![]))
        }
        Event::CloseDetail(reason) => {
            if !state.detail.close(*reason) {
                return Ok((false, vec![]));
            }
            state.store.set_selected_user(None);
            Ok((true, vec![]))
        }

        Event::FocusSearch => {
            if !state.store.is_ready() {
                tracing::debug!("search not available until users are loaded");
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search || !state.store.is_ready() {
                return Ok((false, vec![]));
            }
            let delay = state.search.push_char(*c);
            Ok((true, vec![Action::ScheduleTimer(delay)]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search || !state.store.is_ready() {
                return Ok((false, vec![]));
            }
            Ok(state
                .search
                .backspace()
                .map_or((false, vec![]), |delay| (true, vec![Action::ScheduleTimer(delay)])))
        }
        Event::ClearSearch => {
            state.search.clear();
            state.store.set_search_text("");
            state.clamp_row_cursor();
            Ok((true, vec![]))
        }
        Event::BlurSearch => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::DebounceElapsed => {
            let Some(text) = state.search.on_timer() else {
                return Ok((false, vec![]));
            };
            state.store.set_search_text(text);
            state.row_cursor = 0;
            Ok((true, vec![]))
        }

        Event::OpenCityPicker => {
            if !state.city_filter_enabled() {
                tracing::debug!("city filter not available yet");
                return Ok((false, vec![]));
            }
            state.input_mode = InputMode::CityPicker {
                cursor: state.active_city_option(),
            };
            Ok((true, vec![]))
        }
        Event::PickerDown | Event::PickerUp => {
            let InputMode::CityPicker { cursor } = state.input_mode else {
                return Ok((false, vec![]));
            };
            let len = state.city_option_count();
            let cursor = if *event == Event::PickerDown {
                (cursor + 1) % len
            } else {
                (cursor + len - 1) % len
            };
            state.input_mode = InputMode::CityPicker { cursor };
            Ok((true, vec![]))
        }
        Event::ConfirmCity => {
            let InputMode::CityPicker { cursor } = state.input_mode else {
                return Ok((false, vec![]));
            };
            state.input_mode = InputMode::Normal;
            if let Some(city) = state.city_option(cursor) {
                state.store.set_city_filter(city);
                state.row_cursor = 0;
            }
            Ok((true, vec![]))
        }
        Event::CancelPicker => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }

        Event::ClearFilters => {
            state.store.clear_filters();
            state.search.resync("");
            state.row_cursor = 0;
            Ok((true, vec![]))
        }
        Event::Export(format) => export(state, *format),
        Event::Reload => {
            if !matches!(state.store.status(), LoadStatus::Failed(_)) {
                return Ok((false, vec![]));
            }
            Ok((true, state.restart()))
        }
        Event::CloseFocus => {
            if state.detail.close(CloseReason::Teardown) {
                state.store.set_selected_user(None);
            }
            Ok((false, vec![Action::CloseFocus]))
        }

        Event::PermissionsResult { granted } => {
            if *granted {
                state.web_access = Some(true);
                Ok((true, state.start()))
            } else {
                tracing::warn!("web access denied");
                state.deny_web_access();
                Ok((true, vec![]))
            }
        }
        Event::UsersFetched(outcome) => {
            state.store.finish_load(outcome.clone());
            state.row_cursor = 0;
            Ok((true, vec![]))
        }
        Event::WorkerResponse(response) => {
            match response {
                WorkerResponse::ExportWritten { path, bytes } => {
                    tracing::info!(path = %path, bytes, "export written");
                    state.notice = Some(Notice::info(format!("Exported to {path}")));
                }
                WorkerResponse::Error { message } => {
                    tracing::error!("Worker error: {}", message);
                    state.notice = Some(Notice::error(format!("Export failed: {message}")));
                }
            }
            Ok((true, vec![]))
        }
    }
}

/// Moves to `target` if the pager produced one, resetting the row cursor.
fn go_to(state: &mut AppState, target: Option<usize>) -> bool {
    let Some(page) = target else {
        return false;
    };
    tracing::debug!(page, "page changed");
    state.store.set_page(page);
    state.row_cursor = 0;
    true
}

fn export(state: &mut AppState, format: ExportFormat) -> Result<(bool, Vec<Action>)> {
    if !state.store.is_ready() {
        tracing::debug!("export ignored until users are loaded");
        return Ok((false, vec![]));
    }

    let view = state.store.derived();
    let file = build_export(
        format,
        state.settings.export_policy,
        &view.filtered_users,
        state.store.raw_users(),
        chrono::Utc::now().date_naive(),
    )?;

    state.notice = Some(Notice::info(format!("Exporting {}...", file.file_name)));
    Ok((
        true,
        vec![Action::PostToWorker(WorkerMessage::write_export(
            file.file_name,
            file.contents,
            state.settings.export_dir.clone(),
        ))],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::Settings;
    use crate::domain::user::fixtures::{user, users_in};
    use crate::query::LOAD_FAILED_MESSAGE;
    use crate::ui::Theme;

    fn fresh() -> AppState {
        AppState::new(Theme::default(), Settings::default())
    }

    fn loaded(users: Vec<UserRecord>) -> AppState {
        let mut state = fresh();
        handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
        handle_event(&mut state, &Event::UsersFetched(Ok(users))).unwrap();
        state
    }

    fn send(state: &mut AppState, events: &[Event]) -> Vec<Action> {
        events
            .iter()
            .flat_map(|e| handle_event(state, e).unwrap().1)
            .collect()
    }

    #[test]
    fn granted_permission_issues_the_fetch_once() {
        let mut state = fresh();
        let actions = send(
            &mut state,
            &[
                Event::PermissionsResult { granted: true },
                Event::PermissionsResult { granted: true },
            ],
        );
        assert_eq!(
            actions,
            vec![Action::FetchUsers {
                url: crate::remote::DEFAULT_ENDPOINT.to_string()
            }]
        );
    }

    #[test]
    fn denied_permission_fails_the_load() {
        let mut state = fresh();
        send(&mut state, &[Event::PermissionsResult { granted: false }]);
        assert_eq!(
            state.store.status(),
            &LoadStatus::Failed(LOAD_FAILED_MESSAGE.to_string())
        );
    }

    #[test]
    fn typing_commits_only_after_last_timer() {
        let mut state = loaded(users_in(&["A", "B"]));
        let actions = send(
            &mut state,
            &[Event::FocusSearch, Event::Char('u'), Event::Char('s')],
        );
        assert_eq!(actions.len(), 2);
        assert!(actions.iter().all(|a| matches!(a, Action::ScheduleTimer(_))));

        send(&mut state, &[Event::DebounceElapsed]);
        assert_eq!(state.store.search_text(), "");

        send(&mut state, &[Event::DebounceElapsed]);
        assert_eq!(state.store.search_text(), "us");
    }

    #[test]
    fn chars_outside_search_mode_are_ignored() {
        let mut state = loaded(users_in(&["A"]));
        let (redraw, actions) = handle_event(&mut state, &Event::Char('x')).unwrap();
        assert!(!redraw);
        assert!(actions.is_empty());
        assert_eq!(state.search.draft(), "");
    }

    #[test]
    fn clear_search_commits_immediately() {
        let mut state = loaded(users_in(&["A"]));
        state.store.set_search_text("zzz");
        send(&mut state, &[Event::FocusSearch, Event::Char('q'), Event::ClearSearch]);

        assert_eq!(state.store.search_text(), "");
        assert_eq!(state.search.draft(), "");

        // the timer from 'q' fires later and must not commit anything
        send(&mut state, &[Event::DebounceElapsed]);
        assert_eq!(state.store.search_text(), "");
    }

    #[test]
    fn paging_stays_in_range() {
        let mut state = loaded(users_in(&["A"; 12]));
        assert_eq!(state.store.derived().page_count, 3);

        send(&mut state, &[Event::PreviousPage]);
        assert_eq!(state.store.page(), 1);

        send(&mut state, &[Event::NextPage, Event::NextPage, Event::NextPage]);
        assert_eq!(state.store.page(), 3);

        send(&mut state, &[Event::GoToPage(9)]);
        assert_eq!(state.store.page(), 3);

        send(&mut state, &[Event::GoToPage(2)]);
        assert_eq!(state.store.page(), 2);
    }

    #[test]
    fn page_change_resets_row_cursor() {
        let mut state = loaded(users_in(&["A"; 12]));
        send(&mut state, &[Event::RowDown, Event::RowDown]);
        assert_eq!(state.row_cursor, 2);

        send(&mut state, &[Event::NextPage]);
        assert_eq!(state.row_cursor, 0);
    }

    #[test]
    fn detail_suppresses_navigation_until_closed() {
        let mut state = loaded(users_in(&["A"; 12]));
        send(&mut state, &[Event::RowDown, Event::OpenDetail]);
        assert_eq!(state.store.selected_user().map(|u| u.id), Some(2));
        assert!(state.scroll_lock.is_locked());

        let (redraw, _) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(!redraw);
        send(&mut state, &[Event::RowDown]);
        assert_eq!(state.store.page(), 1);
        assert_eq!(state.row_cursor, 1);

        send(&mut state, &[Event::CloseDetail(CloseReason::Backdrop)]);
        assert!(!state.scroll_lock.is_locked());
        assert!(state.store.selected_user().is_none());

        send(&mut state, &[Event::NextPage]);
        assert_eq!(state.store.page(), 2);
    }

    #[test]
    fn every_close_reason_releases_the_lock() {
        for reason in [
            CloseReason::CloseButton,
            CloseReason::Backdrop,
            CloseReason::Escape,
            CloseReason::Teardown,
        ] {
            let mut state = loaded(users_in(&["A"]));
            send(&mut state, &[Event::OpenDetail, Event::CloseDetail(reason)]);
            assert!(!state.scroll_lock.is_locked(), "{reason:?}");
        }
    }

    #[test]
    fn city_picker_applies_selection_and_resets_page() {
        let mut state = loaded(users_in(&["Paris", "Lyon", "Paris", "Lyon", "Nice", "Paris"]));
        send(&mut state, &[Event::NextPage]);
        assert_eq!(state.store.page(), 2);

        send(&mut state, &[Event::OpenCityPicker]);
        assert_eq!(state.input_mode, InputMode::CityPicker { cursor: 0 });

        // options: All Cities, Lyon, Nice, Paris
        send(&mut state, &[Event::PickerDown, Event::PickerDown, Event::ConfirmCity]);
        assert_eq!(state.store.city_filter(), "Nice");
        assert_eq!(state.store.page(), 1);
        assert_eq!(state.input_mode, InputMode::Normal);

        send(&mut state, &[Event::OpenCityPicker]);
        assert_eq!(state.input_mode, InputMode::CityPicker { cursor: 2 });
        send(&mut state, &[Event::PickerUp, Event::PickerUp, Event::PickerUp, Event::ConfirmCity]);
        assert_eq!(state.store.city_filter(), "Paris");
    }

    #[test]
    fn city_picker_unavailable_while_loading() {
        let mut state = fresh();
        let (redraw, _) = handle_event(&mut state, &Event::OpenCityPicker).unwrap();
        assert!(!redraw);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn clear_filters_resets_draft_and_store() {
        let mut state = loaded(users_in(&["A", "B"]));
        send(&mut state, &[Event::FocusSearch, Event::Char('x')]);
        state.store.set_city_filter("B");

        send(&mut state, &[Event::BlurSearch, Event::ClearFilters]);
        assert_eq!(state.store.search_text(), "");
        assert_eq!(state.store.city_filter(), "");
        assert_eq!(state.search.draft(), "");

        send(&mut state, &[Event::DebounceElapsed]);
        assert_eq!(state.store.search_text(), "");
    }

    #[test]
    fn export_posts_to_worker_only_when_ready() {
        let mut state = fresh();
        assert!(send(&mut state, &[Event::Export(ExportFormat::Csv)]).is_empty());

        let mut state = loaded(vec![user(1, "Ann", "ann@x.io", "Oslo")]);
        let actions = send(&mut state, &[Event::Export(ExportFormat::Csv)]);
        let [Action::PostToWorker(WorkerMessage::WriteExport {
            file_name,
            contents,
            export_dir,
            ..
        })] = actions.as_slice()
        else {
            panic!("expected one worker message, got {actions:?}");
        };
        assert!(file_name.starts_with("users_"));
        assert!(file_name.ends_with(".csv"));
        assert!(contents.contains("\"Ann\""));
        assert_eq!(export_dir, "/host");
        assert!(state.notice.is_some());
    }

    #[test]
    fn worker_responses_become_notices() {
        let mut state = loaded(users_in(&["A"]));
        send(
            &mut state,
            &[Event::WorkerResponse(WorkerResponse::Error {
                message: "disk full".to_string(),
            })],
        );
        let notice = state.notice.clone().unwrap();
        assert!(notice.is_error);
        assert!(notice.text.contains("disk full"));

        send(
            &mut state,
            &[Event::WorkerResponse(WorkerResponse::ExportWritten {
                path: "/tmp/users.csv".to_string(),
                bytes: 10,
            })],
        );
        assert_eq!(state.notice, Some(Notice::info("Exported to /tmp/users.csv")));
    }

    #[test]
    fn reload_only_from_failed_state() {
        let mut state = loaded(users_in(&["A"]));
        assert!(send(&mut state, &[Event::Reload]).is_empty());

        let mut state = fresh();
        send(
            &mut state,
            &[
                Event::PermissionsResult { granted: true },
                Event::UsersFetched(Err(LoadError::Status(500))),
            ],
        );
        let actions = send(&mut state, &[Event::Reload]);
        assert_eq!(actions.len(), 1);
        assert!(matches!(actions[0], Action::FetchUsers { .. }));
        assert_eq!(state.store.status(), &LoadStatus::Loading);

        send(&mut state, &[Event::UsersFetched(Ok(users_in(&["A", "B"])))]);
        assert_eq!(state.store.raw_users().len(), 2);
    }

    #[test]
    fn reload_after_denial_asks_for_permission_again() {
        let mut state = fresh();
        send(&mut state, &[Event::PermissionsResult { granted: false }]);
        assert_eq!(send(&mut state, &[Event::Reload]), vec![Action::RequestPermissions]);
    }

    #[test]
    fn close_focus_tears_down_overlay() {
        let mut state = loaded(users_in(&["A"]));
        send(&mut state, &[Event::OpenDetail]);
        assert!(state.store.selected_user().is_some());

        let actions = send(&mut state, &[Event::CloseFocus]);
        assert_eq!(actions, vec![Action::CloseFocus]);
        assert!(!state.scroll_lock.is_locked());
        assert!(state.store.selected_user().is_none());
    }

    #[test]
    fn hiding_keeps_the_pending_search_commit() {
        let mut state = loaded(users_in(&["A", "B"]));
        send(
            &mut state,
            &[Event::FocusSearch, Event::Char('9'), Event::BlurSearch, Event::CloseFocus],
        );
        assert_eq!(state.store.search_text(), "");

        send(&mut state, &[Event::DebounceElapsed]);
        assert_eq!(state.store.search_text(), "9");
        assert_eq!(state.search.draft(), state.store.search_text());
    }

    #[test]
    fn search_is_unavailable_on_the_failed_screen() {
        let mut state = fresh();
        send(
            &mut state,
            &[
                Event::PermissionsResult { granted: true },
                Event::UsersFetched(Err(LoadError::Status(500))),
            ],
        );

        let (redraw, actions) = handle_event(&mut state, &Event::FocusSearch).unwrap();
        assert!(!redraw);
        assert!(actions.is_empty());
        assert_eq!(state.input_mode, InputMode::Normal);

        state.input_mode = InputMode::Search;
        assert!(send(&mut state, &[Event::Char('r'), Event::Backspace]).is_empty());
        assert_eq!(state.search.draft(), "");

        state.input_mode = InputMode::Normal;
        let actions = send(&mut state, &[Event::Reload]);
        assert!(matches!(actions.as_slice(), [Action::FetchUsers { .. }]));
    }
}

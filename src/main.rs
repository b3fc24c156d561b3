//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the userdeck library and the Zellij plugin
//! system. It maps host events to library events, runs the returned actions
//! through the host API and registers the export worker.
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │
//! │  │  State (plugin)  │   │  ← UI state, event handling, web_request
//! │  └──────────────────┘   │
//! │          │              │
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │  ExportWorker    │   │  ← Export file writes
//! │  │ (worker thread)  │   │
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess` and `FullHdAccess`
//! 3. **Granted**: Issue the one-shot user fetch
//! 4. **Update**: Map events, delegate to `handle_event`, execute actions
//! 5. **Render**: Call the library render function
//!
//! # Keybindings
//!
//! Normal mode:
//! - `j`/`Down`, `k`/`Up`: Move row cursor
//! - `h`/`Left`, `l`/`Right`, `1`-`9`: Change page
//! - `Enter`: Open details
//! - `/`: Focus search
//! - `f`: Pick city
//! - `C`: Clear all filters
//! - `x`/`X`: Export CSV/JSON
//! - `r`: Reload after a failed load
//! - `q`/`Esc`: Close plugin
//!
//! Search mode: type to edit, `Backspace`, `Ctrl+u` to clear, `Enter`/`Esc` to
//! return to the table.
//!
//! City picker: `j`/`k` to move, `Enter` to apply, `Esc` to cancel.
//!
//! Detail overlay: `Esc` or `q` closes it, as does a click outside the box or
//! on its `[x]`.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use userdeck::app::CloseReason;
use userdeck::export::ExportFormat;
use userdeck::ui::FrameHit;
use userdeck::worker::{ExportWorker, WorkerMessage, WorkerResponse};
use userdeck::{handle_event, remote, Action, Config, Event, InputMode};

register_plugin!(State);
register_worker!(ExportWorker, export_worker, EXPORT_WORKER);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: userdeck::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,

    /// Pane size of the last render, for mouse hit testing.
    last_size: (usize, usize),
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: userdeck::initialize(&Config::default()),
            worker_name: "export".to_string(),
            last_size: (0, 0),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, creates the application state, requests
    /// permissions and subscribes to events.
    ///
    /// The fetch is issued once `WebAccess` is granted.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        userdeck::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(endpoint = %config.endpoint, export_dir = ?config.export_dir, "parsed configuration");
        self.app = userdeck::initialize(&config);

        Self::request_permissions();

        subscribe(&[
            EventType::Key,
            EventType::Mouse,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, runs it through `handle_event` and executes
    /// the resulting actions.
    ///
    /// Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => self.map_key_event(key),
            zellij_tile::prelude::Event::Mouse(mouse) => self.map_mouse_event(mouse),
            zellij_tile::prelude::Event::Timer(_) => Some(Event::DebounceElapsed),
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                Self::map_web_result_event(status, &body, &context)
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                self.map_custom_message_event(&message, &payload)
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                Some(Event::PermissionsResult {
                    granted: matches!(status, PermissionStatus::Granted),
                })
            }
            _ => None,
        };
        let Some(our_event) = our_event else {
            return false;
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        self.last_size = (rows, cols);
        userdeck::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn request_permissions() {
        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess, PermissionType::FullHdAccess]);
    }

    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Mouse(_) => "Mouse".to_string(),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    ///
    /// The detail overlay takes precedence. Navigation keys still reach the
    /// handler, which drops them while the scroll lock is held.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if self.app.detail.is_open() {
            match key.bare_key {
                BareKey::Esc => return Some(Event::CloseDetail(CloseReason::Escape)),
                BareKey::Char('q') => return Some(Event::CloseDetail(CloseReason::CloseButton)),
                BareKey::Down
                | BareKey::Up
                | BareKey::Left
                | BareKey::Right
                | BareKey::Char('j' | 'k' | 'h' | 'l' | '1'..='9') => {}
                _ => return None,
            }
        }

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match (&key.bare_key, self.app.input_mode) {
                (BareKey::Char('u'), InputMode::Search) => Some(Event::ClearSearch),
                (BareKey::Char('n'), InputMode::Normal) => Some(Event::RowDown),
                (BareKey::Char('p'), InputMode::Normal) => Some(Event::RowUp),
                _ => None,
            };
        }

        match self.app.input_mode {
            InputMode::Search => match key.bare_key {
                BareKey::Enter | BareKey::Esc => Some(Event::BlurSearch),
                BareKey::Backspace => Some(Event::Backspace),
                BareKey::Char(c) => Some(Event::Char(c)),
                _ => None,
            },
            InputMode::CityPicker { .. } => match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Some(Event::PickerDown),
                BareKey::Up | BareKey::Char('k') => Some(Event::PickerUp),
                BareKey::Enter => Some(Event::ConfirmCity),
                BareKey::Esc => Some(Event::CancelPicker),
                _ => None,
            },
            InputMode::Normal => Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::RowDown,
                BareKey::Up | BareKey::Char('k') => Event::RowUp,
                BareKey::Left | BareKey::Char('h') => Event::PreviousPage,
                BareKey::Right | BareKey::Char('l') => Event::NextPage,
                BareKey::Char(c @ '1'..='9') => Event::GoToPage(c as usize - '0' as usize),
                BareKey::Enter => Event::OpenDetail,
                BareKey::Char('/') => Event::FocusSearch,
                BareKey::Char('f') => Event::OpenCityPicker,
                BareKey::Char('C') => Event::ClearFilters,
                BareKey::Char('x') => Event::Export(ExportFormat::Csv),
                BareKey::Char('X') => Event::Export(ExportFormat::Json),
                BareKey::Char('r') => Event::Reload,
                BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
                _ => return None,
            }),
        }
    }

    /// Maps clicks on the detail overlay to close events.
    fn map_mouse_event(&self, mouse: Mouse) -> Option<Event> {
        let Mouse::LeftClick(line, col) = mouse else {
            return None;
        };
        let line = usize::try_from(line).ok()?;
        let (rows, cols) = self.last_size;

        match userdeck::ui::detail_hit(&self.app, rows, cols, line, col)? {
            FrameHit::CloseButton => Some(Event::CloseDetail(CloseReason::CloseButton)),
            FrameHit::Outside => Some(Event::CloseDetail(CloseReason::Backdrop)),
            FrameHit::Inside => None,
        }
    }

    /// Maps the fetch response to the load outcome.
    fn map_web_result_event(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        if !remote::is_user_response(context) {
            tracing::debug!("ignoring web response with unknown context");
            return None;
        }
        tracing::debug!(status, body_len = body.len(), "user fetch completed");
        Some(Event::UsersFetched(remote::decode_response(status, body)))
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        if message != self.worker_name {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => {
                tracing::debug!(response = ?response, "worker response received");
                Some(Event::WorkerResponse(response))
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    /// Serializes the message as JSON and posts it to the worker thread.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::RequestPermissions => Self::request_permissions(),
            Action::FetchUsers { url } => {
                tracing::debug!(url = %url, "issuing user fetch");
                web_request(
                    url,
                    HttpVerb::Get,
                    remote::request_headers(),
                    vec![],
                    remote::request_context(url),
                );
            }
            Action::ScheduleTimer(delay) => set_timeout(delay.as_secs_f64()),
            Action::PostToWorker(message) => self.post_worker_message(message),
        }
    }
}

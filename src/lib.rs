//! Userdeck: a Zellij plugin for browsing a remote user directory.
//!
//! Userdeck loads a list of user records once per session and lets the
//! operator search it, filter it by city, page through it, open a record in a
//! detail overlay and export the current view as CSV or JSON.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling, debounced search, paging         │
//! │  - Detail overlay and scroll lock                   │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Query Engine  │   │ UI Layer      │   │ Export        │
//! │ (query/)      │   │ (ui/)         │   │ (export/,     │
//! │ - Store       │   │ - Rendering   │   │  worker/)     │
//! │ - Derivation  │   │ - Theming     │   │ - CSV / JSON  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Remote & Infrastructure                    │
//! │  - UserRecord, errors (domain/)                     │
//! │  - Fetch request and decoding (remote/)             │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: User record model and error types
//! - [`export`]: Export shaping and the file sink
//! - [`infrastructure`]: Sandbox path utilities
//! - [`query`]: Query store and derived views
//! - [`remote`]: User directory request and response decoding
//! - [`ui`]: Terminal rendering with theme support
//! - [`worker`]: Background worker writing export files
//! - `observability`: OpenTelemetry tracing (internal)
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/userdeck.wasm" {
//!         endpoint "https://jsonplaceholder.typicode.com/users"
//!         export_dir "~/Downloads"
//!         export_empty "all"
//!         debounce_ms "300"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use userdeck::{handle_event, initialize, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), userdeck::UserdeckError>(())
//! ```

pub mod app;
pub mod domain;
pub mod export;
pub mod infrastructure;
pub mod query;
pub mod remote;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, Settings};
pub use domain::{LoadError, Result, UserRecord, UserdeckError};
pub use ui::Theme;

use app::search::DEFAULT_DEBOUNCE;
use export::EmptyExportPolicy;
use std::collections::BTreeMap;
use std::time::Duration;

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL of the user directory. Default: [`remote::DEFAULT_ENDPOINT`]
    pub endpoint: String,

    /// Host directory for exports; `~` expands to the home directory.
    ///
    /// Defaults to the directory the plugin was launched from.
    pub export_dir: Option<String>,

    /// Export contents when nothing matches: `all` or `none`. Default: `all`
    pub export_empty: EmptyExportPolicy,

    /// Search quiescence window. Default: 300 ms
    pub debounce: Duration,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`. Ignored if
    /// `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. Takes precedence over `theme_name`.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: remote::DEFAULT_ENDPOINT.to_string(),
            export_dir: None,
            export_empty: EmptyExportPolicy::default(),
            debounce: DEFAULT_DEBOUNCE,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unparseable values fall back to their defaults and are logged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::time::Duration;
    /// use userdeck::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "150".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.debounce, Duration::from_millis(150));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let endpoint = non_empty("endpoint").unwrap_or_else(|| remote::DEFAULT_ENDPOINT.to_string());

        let export_empty = non_empty("export_empty").map_or_else(EmptyExportPolicy::default, |v| {
            EmptyExportPolicy::parse(&v).unwrap_or_else(|| {
                tracing::warn!(value = %v, "unknown export_empty value, using default");
                EmptyExportPolicy::default()
            })
        });

        let debounce = non_empty("debounce_ms").map_or(DEFAULT_DEBOUNCE, |v| {
            v.parse::<u64>().map_or_else(
                |_| {
                    tracing::warn!(value = %v, "invalid debounce_ms value, using default");
                    DEFAULT_DEBOUNCE
                },
                Duration::from_millis,
            )
        });

        Self {
            endpoint,
            export_dir: non_empty("export_dir"),
            export_empty,
            debounce,
            theme_name: non_empty("theme"),
            theme_file: non_empty("theme_file"),
            trace_level: non_empty("trace_level"),
        }
    }

    /// Resolves the runtime settings carried by the application state.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings {
            endpoint: self.endpoint.clone(),
            export_dir: infrastructure::resolve_export_dir(self.export_dir.as_deref()),
            export_policy: self.export_empty,
            debounce: self.debounce,
        }
    }
}

/// Creates the application state for a new session.
///
/// The theme comes from `theme_file`, then `theme`, then the built-in
/// default. The session starts in the loading state; the fetch is issued once
/// web access is granted.
///
/// # Example
///
/// ```rust
/// use userdeck::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// assert!(state.web_access.is_none());
/// ```
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(endpoint = %config.endpoint, "initializing userdeck plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(theme, config.settings())
}

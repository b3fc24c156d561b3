//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the plugin runtime (main.rs) and the query, export
//! and worker layers.
//!
//! ```text
//! Keys / Host Events → Events → Event Handler → State Mutations → Actions → Side Effects
//!                                   ↑                                          ↓
//!                                   └────────── Fetch Results / Worker ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`detail`]: Detail overlay and the scroll lock it holds
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Input mode state machine
//! - [`pager`]: Page navigation bounds
//! - [`search`]: Debounced search draft
//! - [`state`]: Central application state and view model computation

pub mod actions;
pub mod detail;
pub mod handler;
pub mod modes;
pub mod pager;
pub mod search;
pub mod state;

pub use actions::Action;
pub use detail::{CloseReason, DetailView, ScrollLock};
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use pager::Pager;
pub use search::SearchCoordinator;
pub use state::{AppState, Notice, Settings};

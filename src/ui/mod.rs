//! Terminal rendering of the users dashboard.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, truncation)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation
//!
//! # Example
//!
//! ```rust,no_run
//! use userdeck::app::{AppState, Settings};
//! use userdeck::ui::{render, Theme};
//!
//! let state = AppState::new(Theme::default(), Settings::default());
//! render(&state, 24, 80);
//! ```

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use components::FrameHit;
pub use renderer::{detail_hit, render};
pub use theme::Theme;
pub use viewmodel::{
    CityPickerInfo, DetailInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo, PageState,
    PagerInfo, SearchBarInfo, UIViewModel,
};

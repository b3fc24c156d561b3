//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component renderers
//!
//! Nothing here clears the screen; the host redraws the pane on every frame.

use crate::app::AppState;
use crate::ui::components::{self, DetailFrame, FrameHit};

/// Renders the plugin UI for a pane of `rows` x `cols` to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_layout(&viewmodel, &state.theme, rows, cols);
}

/// Tests a click at 0-indexed pane position `line`, `col` against the open
/// detail overlay.
///
/// Returns `None` when no overlay is shown.
#[must_use]
pub fn detail_hit(state: &AppState, rows: usize, cols: usize, line: usize, col: usize) -> Option<FrameHit> {
    let viewmodel = state.compute_viewmodel(rows, cols);
    let detail = viewmodel.detail?;
    Some(DetailFrame::for_detail(&detail, rows, cols).hit(line + 1, col + 1))
}

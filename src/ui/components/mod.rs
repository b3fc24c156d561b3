//! Composable UI component renderers.
//!
//! Each component draws one part of the dashboard at an explicit row and
//! returns the next free row where that makes sense.
//!
//! # Components
//!
//! - [`header`]: Title and user counts
//! - [`search`]: Search input with the city control
//! - [`table`]: Users of the current page (NAME, EMAIL, COMPANY, CITY)
//! - [`empty`]: Loading, error and no-results messages
//! - [`pager`]: Page summary and page buttons
//! - [`city`]: City picker overlay
//! - [`detail`]: User detail overlay
//! - [`footer`]: Notice line and keybinding hints
//!
//! [`render_layout`] stacks them into the full page.

mod city;
mod detail;
mod empty;
mod footer;
mod header;
mod pager;
mod search;
mod table;

pub use detail::{render_detail, DetailFrame, FrameHit};

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{PageState, UIViewModel};

use city::render_city_picker;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use pager::render_pager;
use search::render_search_bar;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at the specified row.
///
/// # Returns
///
/// The next available row position (row + 1)
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full page.
///
/// Layout structure:
/// ```text
/// [blank line]
/// [Header - 2 lines]
/// [Border]
/// [Search Bar - 3 lines]
/// [Table Headers]
/// [Table Rows | Empty State]
/// [Blank padding]
/// [Pager - 2 lines]
/// [Border]
/// [Notice]
/// [Keybindings]
/// ```
///
/// Overlays (city picker, then detail) are drawn last so they sit on top.
pub fn render_layout(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let picker_row = current_row + 2;
    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }

    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols, vm.state == PageState::Failed);
    } else {
        current_row = render_table_headers(current_row, theme, cols);
        render_table_rows(current_row, &vm.display_items, theme, cols);
    }

    let footer_start = rows.saturating_sub(2);
    let border_row = footer_start.saturating_sub(1);

    if let Some(pager) = &vm.pager {
        render_pager(border_row.saturating_sub(3), pager, theme, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);

    if let Some(picker) = &vm.city_picker {
        render_city_picker(picker_row, picker, theme, cols, border_row.saturating_sub(picker_row));
    }

    if let Some(detail) = &vm.detail {
        render_detail(detail, theme, rows, cols);
    }
}

//! City picker overlay renderer.
//!
//! The picker drops down from the city control on the right of the search
//! bar. Long city lists scroll so the cursor stays visible.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CityPickerInfo;

/// Gap between the picker and the right edge of the pane.
const RIGHT_MARGIN: usize = 3;

/// Renders the picker box with its top border at `row`.
///
/// At most `max_height` lines are drawn, borders included. The option
/// matching the active filter carries a `●` marker.
pub fn render_city_picker(
    row: usize,
    picker: &CityPickerInfo,
    theme: &Theme,
    cols: usize,
    max_height: usize,
) {
    let longest = picker
        .options
        .iter()
        .map(|o| o.chars().count())
        .max()
        .unwrap_or(0);
    let inner_width = (longest + 4).min(cols.saturating_sub(RIGHT_MARGIN + 4));
    let left = cols.saturating_sub(inner_width + 2 + RIGHT_MARGIN) + 1;

    let visible = max_height.saturating_sub(2).max(1);
    let start = picker.cursor.saturating_sub(visible - 1);

    position_cursor(row, left);
    print!("{}", Theme::fg(&theme.colors.accent));
    print!("┌{}┐", "─".repeat(inner_width));

    let mut current_row = row + 1;
    for (index, option) in picker.options.iter().enumerate().skip(start).take(visible) {
        let marker = if index == picker.active { "● " } else { "  " };
        let label = truncate(option, inner_width.saturating_sub(2));
        let padding = inner_width.saturating_sub(label.chars().count() + 2);

        position_cursor(current_row, left);
        print!("{}", Theme::fg(&theme.colors.accent));
        print!("│");
        if index == picker.cursor {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{marker}{label}{}", " ".repeat(padding));
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.accent));
        print!("│");
        current_row += 1;
    }

    position_cursor(current_row, left);
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());
}

//! Empty state component renderer.
//!
//! Shown in place of the table while loading, after a failed load, when no
//! user matches the filters, and when the current page holds no rows.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders the centered message block starting at `row`.
///
/// ```text
/// [blank]
///            MESSAGE
///            subtitle
/// [blank]
///           [ hint ]
/// ```
///
/// `is_error` switches the message to the theme's error color.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize, is_error: bool) {
    let color = if is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.empty_state_fg
    };

    centered(row + 1, &empty.message, &format!("{}{}", Theme::bold(), Theme::fg(color)), cols);

    if !empty.subtitle.is_empty() {
        centered(row + 2, &empty.subtitle, &Theme::fg(&theme.colors.text_dim), cols);
    }

    if let Some(hint) = &empty.hint {
        centered(row + 4, &format!("[ {hint} ]"), &Theme::fg(&theme.colors.accent), cols);
    }
}

fn centered(row: usize, text: &str, style: &str, cols: usize) {
    let len = text.chars().count();
    let padding = cols.saturating_sub(len) / 2;

    position_cursor(row, 1);
    print!("{style}");
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}

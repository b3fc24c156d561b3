//! Footer component renderer.
//!
//! The footer is two lines: the latest notice (export result or error) and the
//! keybinding hints for the current mode.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the notice line at `row` and the keybinding hints at `row + 1`.
///
/// Text longer than the pane is cut to fit so narrow panes keep their layout.
///
/// # Returns
///
/// The next available row position (row + 2)
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    if let Some(notice) = &footer.notice {
        let color = if notice.is_error {
            &theme.colors.error_fg
        } else {
            &theme.colors.accent
        };
        render_centered(row, &notice.text, &Theme::fg(color), cols);
    }

    render_centered(row + 1, &footer.keybindings, &Theme::fg(&theme.colors.text_dim), cols);
    row + 2
}

fn render_centered(row: usize, text: &str, style: &str, cols: usize) {
    let visible: String = text.chars().take(cols).collect();
    let text_len = visible.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(row, 1);
    print!("{style}");
    print!("{}", " ".repeat(padding));
    print!("{visible}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
}

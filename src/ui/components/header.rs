//! Header component renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the centered title and, below it, the dimmed summary line.
///
/// Always occupies two rows so the layout below does not shift when the
/// summary appears.
///
/// # Returns
///
/// The next available row position (row + 2)
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title_len = header.title.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len)));
    print!("{}", Theme::reset());

    if let Some(subtitle) = &header.subtitle {
        let sub_len = subtitle.chars().count();
        position_cursor(row + 1, 1);
        print!("{}", Theme::fg(&theme.colors.text_dim));
        print!("{}", " ".repeat(cols.saturating_sub(sub_len) / 2));
        print!("{subtitle}");
        print!("{}", Theme::reset());
    }

    row + 2
}

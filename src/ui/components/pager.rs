//! Pagination controls renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PagerInfo;

/// Renders the page summary and the page buttons on the line below it.
///
/// ```text
///        Showing page 2 of 3 • 12 users
///        ‹ Prev   1  [2]  3   Next ›
/// ```
///
/// Disabled Prev/Next buttons are dimmed.
///
/// # Returns
///
/// The next available row position (row + 2)
pub fn render_pager(row: usize, pager: &PagerInfo, theme: &Theme, cols: usize) -> usize {
    let summary_len = pager.summary.chars().count();
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(cols.saturating_sub(summary_len) / 2));
    print!("{}", pager.summary);
    print!("{}", Theme::reset());

    let numbers: Vec<String> = pager
        .pages
        .iter()
        .map(|(n, current)| if *current { format!("[{n}]") } else { format!(" {n} ") })
        .collect();
    let numbers_len: usize = numbers.iter().map(|n| n.chars().count() + 1).sum();
    let buttons_len = "‹ Prev  ".chars().count() + numbers_len + " Next ›".chars().count();

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(cols.saturating_sub(buttons_len) / 2));

    print_button("‹ Prev  ", pager.has_previous, theme);
    for (label, (_, current)) in numbers.iter().zip(&pager.pages) {
        if *current {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.accent));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{label} ");
        print!("{}", Theme::reset());
    }
    print_button(" Next ›", pager.has_next, theme);

    row + 2
}

fn print_button(label: &str, enabled: bool, theme: &Theme) {
    if enabled {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    } else {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{label}");
    print!("{}", Theme::reset());
}

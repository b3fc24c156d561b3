//! Table component renderer.
//!
//! Renders the current page as a four-column table (Name, Email, Company,
//! City) with selection and search match highlighting.

use crate::ui::helpers::{self, column_widths, position_cursor, print_padded, ColumnWidths};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Left margin of the table.
const TABLE_MARGIN: usize = 2;

/// Renders the column headers at `row`.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    let widths = column_widths(cols);

    position_cursor(row, 1);
    print!("{}", " ".repeat(TABLE_MARGIN));
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print_padded("NAME", widths.name + 1);
    print_padded("EMAIL", widths.email + 1);
    print_padded("COMPANY", widths.company + 1);
    print!("CITY");
    print!("{}", Theme::reset());
    row + 1
}

/// Renders every item starting at `row`.
///
/// # Returns
///
/// The next available row position (row + number of items)
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let widths = column_widths(cols);
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, &widths, cols);
    }
    current_row
}

/// Renders a single row, padded to the pane width so the selection
/// background spans the whole line.
fn render_table_row(
    row: usize,
    item: &DisplayItem,
    theme: &Theme,
    widths: &ColumnWidths,
    cols: usize,
) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(TABLE_MARGIN));

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    helpers::render_highlighted_text(&item.name, &item.name_highlights, theme, item.is_selected);
    print!("{}", " ".repeat((widths.name + 1).saturating_sub(item.name.chars().count())));

    helpers::render_highlighted_text(&item.email, &item.email_highlights, theme, item.is_selected);
    print!("{}", " ".repeat((widths.email + 1).saturating_sub(item.email.chars().count())));

    print_padded(&item.company, widths.company + 1);
    print!("{}", item.city);

    let line_len = TABLE_MARGIN
        + widths.name
        + widths.email
        + widths.company
        + 3
        + item.city.chars().count();
    print!("{}", " ".repeat(cols.saturating_sub(line_len + TABLE_MARGIN)));

    print!("{}", Theme::reset());
    row + 1
}
